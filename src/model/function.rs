//! Hosted function descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public descriptor of one hosted function
///
/// The configuration document is kept as dynamic JSON so unknown fields
/// survive a read/write round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionEnvelope {
    /// Function name (directory name under the functions root)
    pub name: String,

    /// Contents of the function's configuration document
    pub config: Value,

    /// Self reference
    pub href: String,

    /// Virtual-filesystem URI of the function directory
    pub script_root_href: String,

    /// Virtual-filesystem URI of the primary script file
    pub script_href: String,

    /// Virtual-filesystem URI of the configuration document
    pub config_href: String,

    /// Virtual-filesystem URI of the sample-data file
    pub test_data_href: String,

    /// Virtual-filesystem URI of the secrets file
    pub secrets_file_href: String,
}

impl FunctionEnvelope {
    /// True when the configuration marks this function disabled
    pub fn is_disabled(&self) -> bool {
        match self.config.get("disabled") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

}
