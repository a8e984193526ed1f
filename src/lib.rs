//! Chat core - FAQ engine behind a portfolio site's chat widget
//!
//! Free-text input is normalized, matched against an ordered knowledge base of
//! intents (falling back to coarser keyword buckets, then a random canned
//! reply), and paced with a synthetic typing delay.

pub mod types;
pub mod error;
pub mod normalize;
pub mod knowledge;
pub mod matcher;
pub mod delay;
pub mod markup;
pub mod config;
pub mod session;

pub use types::*;
pub use error::KbError;
pub use normalize::normalize;
pub use knowledge::{KbDocument, KnowledgeBase};
pub use matcher::*;
pub use delay::*;
pub use markup::{parse_markup, plain_text, Segment};
pub use config::ChatConfig;
pub use session::{ChatSession, PendingReply};

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn chat_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyChatEngine>()?;
    m.add_function(wrap_pyfunction!(py_simulate_typing_delay, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize, m)?)?;
    Ok(())
}
