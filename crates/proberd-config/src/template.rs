//! Template expansion for raw configuration text
//!
//! Config files are templates: they can reference caller-supplied variables,
//! use conditionals, and call the `env_secret` function to pull credentials
//! from the environment. `env_secret` never inlines a real secret during
//! expansion; it emits a `**$NAME**` placeholder that
//! [`crate::secrets::substitute_placeholders`] resolves afterwards, so that
//! template errors and missing secrets stay separate failure domains.

use std::collections::HashMap;
use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};

use crate::error::ConfigResult;
use crate::secrets;

/// Replacement for real secret resolution, mapping a variable name to a
/// fabricated value. Used by config-test mode.
pub type SecretFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Expand `text` with `vars` as the variable namespace.
///
/// With `secret_fn = None`, `env_secret("NAME")` renders the `**$NAME**`
/// placeholder for later substitution. With a stub, it renders the stub's
/// output instead — expansion then never depends on real secrets.
///
/// Any syntax error or reference to an undefined variable is fatal.
pub fn expand(
    text: &str,
    vars: &HashMap<String, String>,
    secret_fn: Option<SecretFn>,
) -> ConfigResult<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    // Template-free text must expand to itself byte for byte; the engine
    // strips the trailing newline unless told otherwise.
    env.set_keep_trailing_newline(true);

    let secret: SecretFn = match secret_fn {
        Some(f) => f,
        None => Arc::new(|name: &str| secrets::placeholder_for(name)),
    };
    env.add_function("env_secret", move |name: String| secret(&name));

    Ok(env.render_str(text, vars)?)
}

/// The stub `config_test` expands with: deterministic, placeholder-free
/// values that never touch the process environment.
pub fn test_secret_fn() -> SecretFn {
    Arc::new(|name: &str| format!("{name}-test-value"))
}
