//! Python bindings for the chat engine using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::delay::simulate_typing_delay;
use crate::error::KbError;
use crate::knowledge::KnowledgeBase;
use crate::matcher::{get_response, pick_greeting, resolve};
use crate::normalize::normalize;
use crate::types::Resolution;

fn to_py_err(e: KbError) -> PyErr {
    PyValueError::new_err(format!("Failed to load knowledge base: {}", e))
}

/// Typing delay in milliseconds for a response (Python function)
#[pyfunction]
#[pyo3(name = "simulate_typing_delay")]
pub fn py_simulate_typing_delay(response: &str) -> u64 {
    simulate_typing_delay(response)
}

/// Normalize text the way the matcher does (Python function)
#[pyfunction]
#[pyo3(name = "normalize")]
pub fn py_normalize(text: &str) -> String {
    normalize(text)
}

/// Python wrapper around a loaded knowledge base
#[pyclass]
pub struct PyChatEngine {
    kb: KnowledgeBase,
}

#[pymethods]
impl PyChatEngine {
    /// Engine over the built-in portfolio knowledge base
    #[new]
    fn new() -> PyResult<Self> {
        let kb = KnowledgeBase::builtin().map_err(to_py_err)?;
        Ok(Self { kb })
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let kb = KnowledgeBase::from_json_str(json).map_err(to_py_err)?;
        Ok(Self { kb })
    }

    #[staticmethod]
    fn from_path(path: &str) -> PyResult<Self> {
        let kb = KnowledgeBase::from_path(path).map_err(to_py_err)?;
        Ok(Self { kb })
    }

    fn get_response(&self, user_message: &str) -> String {
        get_response(&self.kb, user_message).to_string()
    }

    /// Resolve input and describe the branch taken
    fn resolve<'py>(&self, user_message: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let resolution = resolve(&self.kb, user_message);
        let dict = PyDict::new_bound(py);

        match &resolution {
            Resolution::Intent { intent, pattern } => {
                dict.set_item("type", "intent")?;
                dict.set_item("intent", *intent)?;
                dict.set_item("pattern", *pattern)?;
            }
            Resolution::Keyword { bucket, intent } => {
                dict.set_item("type", "keyword")?;
                dict.set_item("bucket", bucket)?;
                dict.set_item("intent", *intent)?;
            }
            Resolution::Fallback { index } => {
                dict.set_item("type", "fallback")?;
                dict.set_item("index", *index)?;
            }
        }
        dict.set_item("response", self.kb.response_for(&resolution))?;
        Ok(dict)
    }

    fn simulate_typing_delay(&self, response: &str) -> u64 {
        simulate_typing_delay(response)
    }

    fn pick_greeting(&self) -> String {
        pick_greeting(&self.kb).to_string()
    }

    fn suggestions(&self) -> Vec<String> {
        self.kb.suggestions().to_vec()
    }

    /// Number of intents
    fn __len__(&self) -> usize {
        self.kb.intents().len()
    }
}
