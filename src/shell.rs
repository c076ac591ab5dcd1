//! Shell integration: environment assignments and the init script sourced
//! from the user's shell rc file.

use crate::state::Element;
use std::path::Path;

/// Variable holding the session's state file path.
pub const ENV_STATE_PATH: &str = "KCN_STATE_PATH";
/// Variable holding the selected context.
pub const ENV_CONTEXT: &str = "KCN_CONTEXT";
/// Variable holding the selected namespace.
pub const ENV_NAMESPACE: &str = "KCN_NAMESPACE";

/// Assignments describing `current`, one per line.
///
/// Meant for `source <(kcn env)`; an empty element clears both variables.
pub fn env_assignments(current: &Element) -> String {
    format!(
        "{}={}\n{}={}",
        ENV_CONTEXT,
        quote(&current.context),
        ENV_NAMESPACE,
        quote(&current.namespace)
    )
}

/// Script that binds a shell session to the state file at `state_path`.
///
/// `fresh` resets the selection variables, for sessions whose state file was
/// just created.
pub fn init_script(state_path: &Path, fresh: bool) -> String {
    let mut script = String::new();
    if fresh {
        script.push_str(&format!("export {}= {}=\n", ENV_CONTEXT, ENV_NAMESPACE));
    }
    script.push_str(&format!(
        "export {}={}\n",
        ENV_STATE_PATH,
        quote(&state_path.to_string_lossy())
    ));
    script.push_str(
        r#"
kcn() {
	command kcn "$@"
	kcn_code=$?
	source <(command kcn env)
	[[ $kcn_code -eq 0 ]] || return $kcn_code
};
"#,
    );
    script.push_str(
        r#"alias kubectl="kubectl \
\${KCN_CONTEXT/[[:alnum:]-]*/--context=\${KCN_CONTEXT}} \
\${KCN_NAMESPACE/[[:alnum:]-]*/--namespace=\${KCN_NAMESPACE}}""#,
    );
    script
}

/// Single-quote `value` unless every character is shell-safe.
fn quote(value: &str) -> String {
    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | '@'));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
