//! Integration tests for baseline-lint rules

use baseline_lint::fix::{apply_fix, apply_fixes};
use baseline_lint::runner::first_fixes;
use baseline_lint::{
    builtin_rules, lint, lint_with_config, Config, Diagnostic, LintResult, Severity, SourceFile,
};

fn parse(source: &str) -> SourceFile {
    SourceFile::parse("Test.java", source).expect("source should parse")
}

fn lint_source(source: &str) -> LintResult {
    lint(&parse(source))
}

fn diags<'a>(result: &'a LintResult, rule: &str) -> Vec<&'a Diagnostic> {
    result.diagnostics.iter().filter(|d| d.rule == rule).collect()
}

// ============ documented scenarios ============

#[test]
fn test_hash_map_capacity_scenario() {
    let flagged = lint_source(
        "import java.util.HashMap;\nclass A { Object m = new HashMap<>(16); }\n",
    );
    let found = diags(&flagged, "hash-map-capacity");
    assert_eq!(found.len(), 1);
    assert!(found[0].help.as_deref().unwrap().contains("newHashMapWithExpectedSize"));

    let default_ctor = lint_source(
        "import java.util.HashMap;\nclass A { Object m = new HashMap<>(); }\n",
    );
    assert!(diags(&default_ctor, "hash-map-capacity").is_empty());

    let copy_ctor = lint_source(
        "import java.util.HashMap;\nimport java.util.Map;\n\
         class A { void f(Map<String, String> existing) { Object m = new HashMap<>(existing); } }\n",
    );
    assert!(diags(&copy_ctor, "hash-map-capacity").is_empty());
}

#[test]
fn test_safe_arg_exception_message_scenario() {
    let flagged = lint_source(
        "import com.palantir.logsafe.SafeArg;\n\
         class A {\n\
           void f() {\n\
             try { g(); } catch (RuntimeException e) {\n\
               Object a = SafeArg.of(\"cause\", e.getMessage());\n\
             }\n\
           }\n\
         }\n",
    );
    assert_eq!(diags(&flagged, "safe-logging-exception-message").len(), 1);

    let safe = lint_source(
        "import com.palantir.logsafe.SafeArg;\n\
         class A {\n\
           void f(String someSafeString) {\n\
             Object a = SafeArg.of(\"cause\", someSafeString);\n\
           }\n\
         }\n",
    );
    assert!(diags(&safe, "safe-logging-exception-message").is_empty());
}

#[test]
fn test_rate_limiter_scenario() {
    let header = "import com.google.common.util.concurrent.RateLimiter;\n\
                  import java.time.Duration;\n";
    let flagged = lint_source(&format!(
        "{header}class A {{ Object r = RateLimiter.create(5.0); }}\n"
    ));
    assert_eq!(diags(&flagged, "rate-limiter-warmup").len(), 1);

    let with_warmup = lint_source(&format!(
        "{header}class A {{ Object r = RateLimiter.create(5.0, Duration.ofSeconds(1)); }}\n"
    ));
    assert!(diags(&with_warmup, "rate-limiter-warmup").is_empty());
}

// ============ cross-cutting policies ============

#[test]
fn test_test_code_exemption_and_non_test_twin() {
    let body = "void f() { assert 1 > 0; }";
    let test_class = format!(
        "import org.junit.jupiter.api.Test;\nclass T {{ @Test {body} }}\n"
    );
    let plain_class = format!("class T {{ {body} }}\n");

    assert!(diags(&lint_source(&test_class), "bad-assert").is_empty());
    assert_eq!(diags(&lint_source(&plain_class), "bad-assert").len(), 1);
}

#[test]
fn test_suppression_is_per_declaration() {
    let source = "import java.util.HashMap;\n\
                  class A {\n\
                    @SuppressWarnings(\"hash-map-capacity\")\n\
                    void suppressed() { Object m = new HashMap<>(16); }\n\
                    void loud() { Object m = new HashMap<>(16); }\n\
                  }\n";
    let result = lint_source(source);
    assert_eq!(diags(&result, "hash-map-capacity").len(), 1);
}

#[test]
fn test_suppression_via_legacy_alias() {
    let source = "import java.util.HashMap;\n\
                  @SuppressWarnings(\"HashMapUsage\")\n\
                  class A { Object m = new HashMap<>(16); }\n";
    let result = lint_source(source);
    assert!(diags(&result, "hash-map-capacity").is_empty());
}

#[test]
fn test_null_literal_comparison_never_flagged() {
    let result = lint_source(
        "class A { boolean f(String s) { return s == null || null != s; } }\n",
    );
    assert!(diags(&result, "string-equality").is_empty());
}

#[test]
fn test_unresolved_symbols_are_silent() {
    // Nothing resolvable: every rule must fail closed, not panic.
    let result = lint_source(
        "class A {\n\
           void f(Mystery m) {\n\
             m.getMessage();\n\
             Object x = new Gadget<>(16);\n\
             if (m.isDebugEnabled()) { m.info(\"x\"); }\n\
           }\n\
         }\n",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_syntax_error_file_does_not_panic() {
    let source = parse("class A { void f( { assert; } \n");
    let result = lint(&source);
    // Whatever is reported, analysis must complete.
    let _ = result.diagnostics;
}

// ============ configuration ============

#[test]
fn test_config_disables_and_overrides() {
    let source = parse(
        "import java.util.HashMap;\n\
         class A {\n\
           Object m = new HashMap<>(16);\n\
           boolean f(String a, String b) { return a == b; }\n\
         }\n",
    );
    let config = Config::default()
        .with_disabled("string-equality")
        .with_severity("hash-map-capacity", Severity::Error);
    let result = lint_with_config(&source, &config).unwrap();
    assert!(diags(&result, "string-equality").is_empty());
    let hm = diags(&result, "hash-map-capacity");
    assert_eq!(hm.len(), 1);
    assert_eq!(hm[0].severity, Severity::Error);
    assert!(result.has_errors());
}

#[test]
fn test_deny_list_flag_round_trip() {
    let config = Config::from_toml_str(
        "[flags]\ndeniedSafeArgNames = [\"cause\"]\n",
    )
    .unwrap();
    let source = parse(
        "import com.palantir.logsafe.SafeArg;\n\
         class A { Object a = SafeArg.of(\"cause\", \"value\"); }\n",
    );
    let result = lint_with_config(&source, &config).unwrap();
    assert_eq!(diags(&result, "safe-arg-denied-names").len(), 1);
}

// ============ fixes ============

#[test]
fn test_every_fix_is_idempotent() {
    let sources = [
        "import java.util.HashMap;\nclass A { Object m = new HashMap<>(16); }\n".to_string(),
        "class A { void f(int x) { assert x > 0 : \"positive\"; } }\n".to_string(),
        "class A { boolean f(String a, String b) { return a != b; } }\n".to_string(),
        "import com.palantir.logsafe.SafeArg;\n\
         class A {\n\
           void f() {\n\
             try { g(); } catch (RuntimeException e) {\n\
               Object a = SafeArg.of(\"cause\", e.getMessage());\n\
             }\n\
           }\n\
         }\n"
            .to_string(),
        "public class Util { private Util() {} }\n".to_string(),
    ];
    for source in &sources {
        let result = lint_source(source);
        let fixable: Vec<&Diagnostic> = result
            .diagnostics
            .iter()
            .filter(|d| !d.fixes.is_empty())
            .collect();
        assert!(!fixable.is_empty(), "expected a fixable diagnostic in {source:?}");
        for diag in fixable {
            let fixed = apply_fix(source, &diag.fixes[0]);
            let rerun = lint_source(&fixed);
            assert!(
                diags(&rerun, &diag.rule).is_empty(),
                "fix for {} not idempotent:\n{fixed}",
                diag.rule
            );
        }
    }
}

#[test]
fn test_fixes_never_overlap_within_one_fix() {
    let source = "import org.slf4j.Logger;\nimport org.slf4j.LoggerFactory;\n\
                  class A {\n\
                    private static final Logger LOGGER = LoggerFactory.getLogger(A.class);\n\
                    void f() { LOGGER.info(\"a\"); LOGGER.warn(\"b\"); }\n\
                  }\n";
    let result = lint_source(source);
    for diag in &result.diagnostics {
        for fix in &diag.fixes {
            for pair in fix.replacements.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap in {}", diag.rule);
            }
        }
    }
}

#[test]
fn test_apply_fixes_resolves_whole_file() {
    let source = "import java.util.HashMap;\n\
                  class A {\n\
                    Object a = new HashMap<>(8);\n\
                    Object b = new HashMap<>(32);\n\
                  }\n";
    let result = lint_source(source);
    let fixes = first_fixes(&result);
    assert_eq!(fixes.len(), 2);
    let (rewritten, applied) = apply_fixes(source, &fixes);
    assert_eq!(applied, 2);
    assert!(rewritten.contains("Maps.newHashMapWithExpectedSize(8)"));
    assert!(rewritten.contains("Maps.newHashMapWithExpectedSize(32)"));
    // One import line serves both rewrites after re-linting.
    let rerun = lint_source(&rewritten);
    assert!(diags(&rerun, "hash-map-capacity").is_empty());
}

#[test]
fn test_fix_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cache.java");
    std::fs::write(
        &path,
        "import java.util.HashMap;\nclass Cache { Object m = new HashMap<>(64); }\n",
    )
    .unwrap();

    let source = SourceFile::read(&path).unwrap();
    let result = lint(&source);
    let fixes = first_fixes(&result);
    assert_eq!(fixes.len(), 1);
    let (rewritten, applied) = apply_fixes(source.text(), &fixes);
    assert_eq!(applied, 1);
    std::fs::write(&path, &rewritten).unwrap();

    let reread = SourceFile::read(&path).unwrap();
    let rerun = lint(&reread);
    assert!(diags(&rerun, "hash-map-capacity").is_empty());
    assert!(reread.text().contains("import com.google.common.collect.Maps;"));
}

#[test]
fn test_config_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline-lint.toml");
    std::fs::write(&path, "disabled = [\"bad-assert\"]\n").unwrap();

    let config = Config::load(&path).unwrap();
    let source = parse("class A { void f(int x) { assert x > 0; } }\n");
    let result = lint_with_config(&source, &config).unwrap();
    assert!(diags(&result, "bad-assert").is_empty());

    assert!(Config::load(dir.path().join("missing.toml")).is_err());
}

// ============ registry ============

#[test]
fn test_registry_is_explicit_and_stable() {
    let rules = builtin_rules();
    assert_eq!(rules.len(), 10);
    let names: Vec<&str> = rules.iter().map(|e| e.info.name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "registry should enumerate rules in stable order");
    for entry in &rules {
        assert!(!entry.info.description.is_empty());
    }
}
