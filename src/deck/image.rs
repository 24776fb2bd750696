//! What to show for the current card.

use bytes::Bytes;

/// Resolved artwork for the card on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    /// No card drawn yet: show the card back.
    Back,
    /// The card's face, as downloaded.
    Face(Bytes),
    /// The face could not be fetched or decoded.
    Placeholder,
}

impl CardImage {
    /// Classify a downloaded payload by sniffing its image format.
    pub fn from_payload(bytes: Bytes) -> Self {
        match image::guess_format(&bytes) {
            Ok(format) => {
                tracing::trace!("Card image is {:?} ({} bytes)", format, bytes.len());
                CardImage::Face(bytes)
            }
            Err(_) => CardImage::Placeholder,
        }
    }

    pub fn is_face(&self) -> bool {
        matches!(self, CardImage::Face(_))
    }

    /// Short description for text output.
    pub fn describe(&self) -> String {
        match self {
            CardImage::Back => "card back".to_string(),
            CardImage::Face(bytes) => format!("card face ({} bytes)", bytes.len()),
            CardImage::Placeholder => "default card".to_string(),
        }
    }
}
