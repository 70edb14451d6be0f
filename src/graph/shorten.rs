//! Shortening of fully qualified function names for display.

use regex::Regex;
use std::sync::LazyLock;

static CPP_ANONYMOUS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(anonymous namespace\)::").expect("valid pattern"));

static GO_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)/v(?:[2-9]|[1-9][0-9]+)([./].*)$").expect("valid pattern")
});

static GO_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[\w\-\.]+/)+([^.]+\..+)").expect("valid pattern"));

static JAVA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z]\w*\.)*([A-Z][\w\$]*\.(?:<init>|[a-z][\w\$]*(?:\$\d+)?))(?:(?:\()|$)")
        .expect("valid pattern")
});

static CPP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[_a-zA-Z]\w*::)+(_*[A-Z]\w*::~?[_a-zA-Z]\w*(?:<.*>)?)")
        .expect("valid pattern")
});

/// Shorten a function name by dropping package paths and namespaces.
///
/// Go, Java and C++ naming schemes are recognised; anything else is
/// returned unchanged.
pub fn shorten_function_name(name: &str) -> String {
    let name = CPP_ANONYMOUS_PREFIX.replace_all(name, "");
    let name = GO_VERSION.replace_all(&name, "${1}${2}");

    for re in [&*GO_PACKAGE, &*JAVA, &*CPP] {
        if let Some(caps) = re.captures(&name) {
            return caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect();
        }
    }
    name.into_owned()
}
