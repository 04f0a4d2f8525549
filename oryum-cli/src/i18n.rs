//! User-facing message catalogs
//!
//! Message keys are the English texts themselves, so the English catalog
//! is the identity and unknown keys pass through unchanged. Placeholders are
//! written `{name}` and filled by [`Translator::text`].

use clap::ValueEnum;

/// Looks up user-facing text
pub trait Translator {
    /// Translated template for `key`, or `key` itself when none exists
    fn lookup<'a>(&'a self, key: &'a str) -> &'a str;

    /// Translate `key` and substitute its `{placeholders}`
    fn text(&self, key: &str, args: &[(&str, &str)]) -> String {
        fill(self.lookup(key), args)
    }
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Brazilian Portuguese
    #[value(name = "pt-br", aliases = ["pt_br", "pt"])]
    PtBr,
}

/// Built-in catalog for a [`Locale`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    /// Catalog for `locale`
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Active locale
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

impl Translator for Catalog {
    fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        match self.locale {
            Locale::En => key,
            Locale::PtBr => PT_BR
                .iter()
                .find(|(english, _)| *english == key)
                .map_or(key, |(_, translated)| *translated),
        }
    }
}

fn fill(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

const PT_BR: &[(&str, &str)] = &[
    ("model", "modelo"),
    ("controller", "controlador"),
    ("Generating {kind} {name}...", "Gerando {kind} {name}..."),
    ("Created {kind} {name} in {path}", "{kind} {name} criado em {path}"),
    ("Registered in {aggregator}", "Registrado em {aggregator}"),
    ("Already registered in {aggregator}", "Já registrado em {aggregator}"),
    ("Creating project {name}...", "Criando projeto {name}..."),
    ("Created project {name} in {path}", "Projeto {name} criado em {path}"),
    ("Next steps:", "Próximos passos:"),
    ("Not a project", "Não é um projeto"),
    ("Invalid input", "Entrada inválida"),
    ("Already exists", "Já existe"),
    ("Template not found", "Template não encontrado"),
    ("Template error", "Erro no template"),
    ("I/O error", "Erro de E/S"),
    ("Configuration error", "Erro de configuração"),
];
