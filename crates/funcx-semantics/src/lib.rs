//! Shared funcx semantic tables used by both the runtime and the CLI.
//!
//! This crate centralizes the reserved function names and namespace prefixes
//! so the expansion engine and the tooling classify calls identically.

/// Reserved function families addressed with a dotted prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Hash,
    Url,
    Web,
    Ip,
    Json,
    String,
    Math,
    Array,
}

impl Namespace {
    /// All namespaces in prefix-table order.
    pub const ALL: [Namespace; 8] = [
        Namespace::Hash,
        Namespace::Url,
        Namespace::Web,
        Namespace::Ip,
        Namespace::Json,
        Namespace::String,
        Namespace::Math,
        Namespace::Array,
    ];

    /// The dotted prefix for this namespace, e.g. `"string."`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Namespace::Hash => "hash.",
            Namespace::Url => "url.",
            Namespace::Web => "web.",
            Namespace::Ip => "ip.",
            Namespace::Json => "json.",
            Namespace::String => "string.",
            Namespace::Math => "math.",
            Namespace::Array => "array.",
        }
    }

    /// The namespace name without the trailing dot.
    pub fn name(self) -> &'static str {
        let prefix = self.prefix();
        &prefix[..prefix.len() - 1]
    }
}

/// Resolve the reserved namespace a function name belongs to.
///
/// Matching is ASCII case-insensitive, so `String.Upper` resolves to
/// [`Namespace::String`].
pub fn resolve_namespace(name: &str) -> Option<Namespace> {
    Namespace::ALL
        .into_iter()
        .find(|ns| starts_with_ignore_case(name, ns.prefix()))
}

/// Whether `name` starts with one of the reserved namespace prefixes.
pub fn has_namespace_prefix(name: &str) -> bool {
    resolve_namespace(name).is_some()
}

/// Whether `name` is a known base function.
///
/// True for the fixed set of unprefixed built-ins (compared ASCII
/// case-insensitively) and for any name inside a reserved namespace.
pub fn is_known_base_function(name: &str) -> bool {
    KNOWN_BASE_FUNCTIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
        || has_namespace_prefix(name)
}

/// Unprefixed built-in function names.
///
/// Used for diagnostics and for classifying the first step of a pipeline.
pub fn known_base_functions() -> &'static [&'static str] {
    KNOWN_BASE_FUNCTIONS
}

/// Reserved namespace prefixes, each including its trailing dot.
pub fn namespace_prefixes() -> &'static [&'static str] {
    &NAMESPACE_PREFIXES
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

const KNOWN_BASE_FUNCTIONS: &[&str] = &[
    "today",
    "now",
    "yesterday",
    "tomorrow",
    "guid",
    "random",
    "base64encode",
    "base64decode",
    "env",
    "username",
    "computername",
];

static NAMESPACE_PREFIXES: [&str; Namespace::ALL.len()] = {
    let mut prefixes = [""; Namespace::ALL.len()];
    let mut i = 0;
    while i < prefixes.len() {
        prefixes[i] = Namespace::ALL[i].prefix();
        i += 1;
    }
    prefixes
};
