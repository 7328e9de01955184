use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a browser API while binding a behavior.
///
/// Missing markup is not an error; initializers return `Ok(())` for that.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("{context} failed: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl BindError {
    /// Adapter for `map_err` on web-sys results.
    pub fn js(context: &'static str) -> impl FnOnce(JsValue) -> BindError {
        move |value| BindError::Js {
            context,
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(BindError::NoWindow.to_string(), "window is not available");
        let err = BindError::Js {
            context: "addEventListener",
            message: "TypeError".to_string(),
        };
        assert_eq!(err.to_string(), "addEventListener failed: TypeError");
    }
}
