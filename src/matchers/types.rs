//! Static supertype lattice for well-known types
//!
//! Checks only reason about a fixed set of JDK and library types; anything
//! outside the lattice is treated as unresolved and matchers fail closed.

/// Direct supertypes of each known type, keyed by qualified name.
static SUPERTYPES: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "java.lang.Object" => &[],
    "java.lang.String" => &["java.lang.Object", "java.lang.CharSequence"],
    "java.lang.CharSequence" => &["java.lang.Object"],
    "java.lang.StringBuilder" => &["java.lang.Object", "java.lang.CharSequence"],
    "java.lang.Integer" => &["java.lang.Number"],
    "java.lang.Long" => &["java.lang.Number"],
    "java.lang.Double" => &["java.lang.Number"],
    "java.lang.Number" => &["java.lang.Object"],
    "java.lang.Boolean" => &["java.lang.Object"],

    "java.lang.Throwable" => &["java.lang.Object"],
    "java.lang.Exception" => &["java.lang.Throwable"],
    "java.lang.RuntimeException" => &["java.lang.Exception"],
    "java.lang.Error" => &["java.lang.Throwable"],
    "java.lang.IllegalArgumentException" => &["java.lang.RuntimeException"],
    "java.lang.IllegalStateException" => &["java.lang.RuntimeException"],
    "java.lang.NullPointerException" => &["java.lang.RuntimeException"],
    "java.lang.UnsupportedOperationException" => &["java.lang.RuntimeException"],
    "java.io.IOException" => &["java.lang.Exception"],
    "java.io.UncheckedIOException" => &["java.lang.RuntimeException"],

    "java.lang.Iterable" => &["java.lang.Object"],
    "java.util.Collection" => &["java.lang.Iterable"],
    "java.util.List" => &["java.util.Collection"],
    "java.util.Set" => &["java.util.Collection"],
    "java.util.Map" => &["java.lang.Object"],
    "java.util.AbstractMap" => &["java.lang.Object", "java.util.Map"],
    "java.util.HashMap" => &["java.util.AbstractMap"],
    "java.util.LinkedHashMap" => &["java.util.HashMap"],
    "java.util.TreeMap" => &["java.util.AbstractMap"],
    "java.util.HashSet" => &["java.util.Set"],
    "java.util.ArrayList" => &["java.util.List"],
    "java.util.Objects" => &["java.lang.Object"],
    "java.util.Optional" => &["java.lang.Object"],
    "java.time.Duration" => &["java.lang.Object"],
    "java.io.Serializable" => &["java.lang.Object"],

    "org.slf4j.Logger" => &["java.lang.Object"],
    "org.slf4j.LoggerFactory" => &["java.lang.Object"],

    "com.google.common.util.concurrent.RateLimiter" => &["java.lang.Object"],
    "com.google.common.collect.Maps" => &["java.lang.Object"],
    "com.google.common.base.Preconditions" => &["java.lang.Object"],

    "com.palantir.logsafe.Arg" => &["java.lang.Object", "java.io.Serializable"],
    "com.palantir.logsafe.SafeArg" => &["com.palantir.logsafe.Arg"],
    "com.palantir.logsafe.UnsafeArg" => &["com.palantir.logsafe.Arg"],
};

/// Types implicitly in scope without an import.
pub static JAVA_LANG_SIMPLE: phf::Set<&'static str> = phf::phf_set! {
    "Object", "String", "CharSequence", "StringBuilder",
    "Integer", "Long", "Double", "Number", "Boolean",
    "Throwable", "Exception", "RuntimeException", "Error",
    "IllegalArgumentException", "IllegalStateException",
    "NullPointerException", "UnsupportedOperationException",
    "Iterable", "Comparable", "Runnable", "Thread", "System", "Math",
    "SuppressWarnings", "Override", "Deprecated",
};

pub fn is_known_type(qualified: &str) -> bool {
    SUPERTYPES.contains_key(qualified)
}

/// Walks the supertype lattice. Unknown types are not subtypes of
/// anything except themselves.
pub fn is_subtype_of(sub: &str, sup: &str) -> bool {
    if sub == sup {
        return true;
    }
    let mut stack: Vec<&str> = vec![sub];
    let mut seen: Vec<&str> = Vec::new();
    while let Some(current) = stack.pop() {
        if seen.contains(&current) {
            continue;
        }
        seen.push(current);
        let Some(parents) = SUPERTYPES.get(current) else {
            continue;
        };
        for parent in parents.iter() {
            if *parent == sup {
                return true;
            }
            stack.push(parent);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        assert!(is_subtype_of("java.util.HashMap", "java.util.HashMap"));
    }

    #[test]
    fn test_transitive() {
        assert!(is_subtype_of("java.util.LinkedHashMap", "java.util.Map"));
        assert!(is_subtype_of("java.io.IOException", "java.lang.Throwable"));
        assert!(is_subtype_of("com.palantir.logsafe.SafeArg", "java.io.Serializable"));
    }

    #[test]
    fn test_not_subtype() {
        assert!(!is_subtype_of("java.lang.String", "java.lang.Throwable"));
        assert!(!is_subtype_of("java.util.Map", "java.util.HashMap"));
    }

    #[test]
    fn test_unknown_types_fail_closed() {
        assert!(!is_subtype_of("com.example.Custom", "java.lang.Object"));
        assert!(is_subtype_of("com.example.Custom", "com.example.Custom"));
    }
}
