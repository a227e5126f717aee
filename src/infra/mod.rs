//! Collaborators around the core: clock, markup, crypto, debounce, analysis

mod analysis;
mod clock;
mod crypto;
mod debounce;
mod markup;

pub use analysis::{Analyzer, Insights, KeyTerm, KeywordAnalyzer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{AesCipher, Cipher, CryptoError, password_strength, strength_label};
pub use debounce::Debouncer;
pub use markup::{plain_text, preview};
