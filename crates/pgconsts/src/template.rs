//! Template rendering.
//!
//! Templates are [minijinja](https://docs.rs/minijinja) templates rendered with
//! a [`GenerationRequest`] as context:
//!
//! - `package`: module name for the generated code
//! - `tables`: list of tables, each with `name`, `schema` and `columns`
//! - `columns`: list of columns, each with `name` and `type`
//!
//! Referencing anything else is an error. The helpers of
//! [`TemplateFunctions::standard`] are callable both as functions
//! (`ExportName(table.name)`) and as filters (`table.name | ExportName`).
//! SQL names may contain any character, so Rust output should go through
//! `ExportIdent` in identifier position and `RustStr` inside literals.

use crate::error::{GenError, GenResult};
use crate::model::GenerationRequest;
use crate::naming;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::collections::BTreeMap;

/// Template used when no template file is given.
pub const DEFAULT_TEMPLATE: &str = r#"//! Code generated by pgconsts; DO NOT EDIT.

pub mod {{ package }} {
{%- for table in tables %}
    /// {{ table.name | ExportIdent }}Columns holds the column names of the {{ table.name }} table
    #[allow(non_snake_case)]
    pub struct {{ table.name | ExportIdent }}Columns {
        pub TableName: &'static str,
        {%- for column in table.columns %}
        /// {{ column.type }}
        pub {{ column.name | ExportIdent }}: &'static str,
        {%- endfor %}
    }

    /// {{ table.name | ExportIdent }} contains constants for the {{ table.name }} table
    #[allow(non_upper_case_globals)]
    pub const {{ table.name | ExportIdent }}: {{ table.name | ExportIdent }}Columns = {{ table.name | ExportIdent }}Columns {
        TableName: {{ table.name | RustStr }},
        {%- for column in table.columns %}
        {{ column.name | ExportIdent }}: {{ column.name | RustStr }},
        {%- endfor %}
    };
{% endfor %}
}
"#;

/// A string helper callable from templates.
pub type TemplateFn = fn(&str) -> String;

/// Named helpers made available to a template.
///
/// The names of [`TemplateFunctions::standard`] are part of the template
/// contract: templates written against them break if one is renamed.
#[derive(Debug, Clone, Default)]
pub struct TemplateFunctions {
    entries: BTreeMap<&'static str, TemplateFn>,
}

impl TemplateFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut fns = Self::new();
        fns.insert("ExportName", naming::export_name);
        fns.insert("ExportIdent", naming::export_ident);
        fns.insert("RustStr", naming::rust_str);
        fns.insert("ToUpper", naming::to_upper);
        fns.insert("ToLower", naming::to_lower);
        fns.insert("Title", naming::title);
        fns.insert("SnakeCase", naming::snake_case);
        fns.insert("UpperCamelCase", naming::upper_camel_case);
        fns.insert("ShoutySnakeCase", naming::shouty_snake_case);
        fns
    }

    /// Register `f` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: &'static str, f: TemplateFn) -> &mut Self {
        self.entries.insert(name, f);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    fn register(&self, env: &mut Environment<'_>) {
        for (&name, &f) in &self.entries {
            env.add_function(name, move |value: String| f(&value));
            env.add_filter(name, move |value: String| f(&value));
        }
    }
}

/// Render `request` through `template_text`.
///
/// Fails with [`GenError::Template`] if the template does not parse and with
/// [`GenError::Execution`] if rendering fails.
pub fn render(
    request: &GenerationRequest,
    template_text: &str,
    functions: &TemplateFunctions,
) -> GenResult<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    functions.register(&mut env);

    let template = env
        .template_from_str(template_text)
        .map_err(GenError::Template)?;
    template.render(request).map_err(GenError::Execution)
}
