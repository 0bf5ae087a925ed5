use serde::Deserialize;
use termlink_registry::CreateInstance;

/// Parameters of a `createTerminal` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTerminalOptions {
    pub name: Option<String>,
    pub shell_path: Option<String>,
    pub shell_args: Option<Vec<String>>,
}

impl From<CreateTerminalOptions> for CreateInstance {
    /// Terminals created through the bridge are always interactive.
    fn from(options: CreateTerminalOptions) -> Self {
        CreateInstance {
            name: options.name,
            shell_path: options.shell_path,
            shell_args: options.shell_args,
            interactive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case() {
        let options: CreateTerminalOptions = serde_json::from_str(
            r#"{"name":"build","shellPath":"/bin/bash","shellArgs":["-l"]}"#,
        )
        .unwrap();
        assert_eq!(options.name.as_deref(), Some("build"));
        assert_eq!(options.shell_path.as_deref(), Some("/bin/bash"));
        assert_eq!(options.shell_args, Some(vec!["-l".to_string()]));
    }

    #[test]
    fn all_fields_optional() {
        let options: CreateTerminalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CreateTerminalOptions::default());
    }

    #[test]
    fn conversion_marks_interactive() {
        let request: CreateInstance = CreateTerminalOptions::default().into();
        assert!(request.interactive);
    }
}
