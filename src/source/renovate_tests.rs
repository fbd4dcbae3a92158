use super::*;
use crate::git::MockCommitsGetter;

fn commit(hash: &str, message: &str) -> Commit {
    Commit {
        message: message.into(),
        hash: hash.into(),
        author: "Renovate Bot".into(),
        files: vec![],
    }
}

fn v(text: &str) -> Option<Version> {
    Some(Version::parse(text).unwrap())
}

fn names(dependencies: &[Dependency]) -> Vec<&str> {
    dependencies.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn strips_helm_release_affix_from_title() {
    let dependencies = parse_commit(
        &commit(
            "abc",
            "chore(deps): update helm release common-library to v1.0.4",
        ),
        &mut Diagnostics::new(),
    );

    assert_eq!(dependencies.len(), 1);
    assert_eq!(dependencies[0].name, "common-library");
    assert_eq!(dependencies[0].from, None);
    assert_eq!(dependencies[0].to, v("1.0.4"));
    assert_eq!(dependencies[0].to.as_ref().unwrap().original(), "v1.0.4");
    assert_eq!(dependencies[0].meta.commit.as_deref(), Some("abc"));
}

#[test]
fn title_with_pr_number() {
    let dependencies = parse_commit(
        &commit("abc", "Update module github.com/spf13/cobra to v1.8.0 (#123)"),
        &mut Diagnostics::new(),
    );

    assert_eq!(dependencies[0].name, "github.com/spf13/cobra");
    assert_eq!(dependencies[0].to, v("1.8.0"));
    assert_eq!(dependencies[0].meta.pr.as_deref(), Some("123"));
}

#[test]
fn strips_trailing_affixes() {
    let cases = [
        ("Update actions/checkout action to v4", "actions/checkout"),
        ("Update golang Docker tag to v1.21", "golang"),
        ("update dependency eslint to v8.57.0 (!55)", "eslint"),
    ];

    for (title, name) in cases {
        let dependencies =
            parse_commit(&commit("abc", title), &mut Diagnostics::new());
        assert_eq!(dependencies[0].name, name, "title: {title}");
    }
}

#[test]
fn keeps_names_that_contain_affix_words() {
    assert_eq!(strip_affixes("my-module"), "my-module");
    assert_eq!(strip_affixes("module-loader"), "module-loader");
    assert_eq!(strip_affixes("Helm Release foo"), "foo");
    assert_eq!(strip_affixes("action"), "action");
}

#[test]
fn title_without_version_is_name_only() {
    let dependencies = parse_commit(
        &commit("abc", "chore(deps): update all non-major dependencies"),
        &mut Diagnostics::new(),
    );

    assert_eq!(dependencies[0].name, "all non-major dependencies");
    assert_eq!(dependencies[0].to, None);
}

#[test]
fn skips_titles_without_update() {
    let mut diagnostics = Diagnostics::new();
    let dependencies =
        parse_commit(&commit("abc", "chore: pin things"), &mut diagnostics);

    assert!(dependencies.is_empty());
    assert_eq!(diagnostics.entries().len(), 1);
}

const TABLE_COMMIT: &str = r#"chore(deps): update helm charts (#77)

This PR contains the following updates:

| Package | Update | Change |
|---|---|---|
| [common-library](https://charts.example.com) | patch | `1.0.3` -> `1.0.4` |
| [ingress-nginx](https://kubernetes.github.io/ingress-nginx) | minor | `v4.7.0` -> `v4.8.0` |
| broken row | patch |
| `plain-name` | major | `1` -> `2` |
"#;

#[test]
fn parses_body_table_in_table_order() {
    let mut dependencies =
        parse_commit(&commit("abc", TABLE_COMMIT), &mut Diagnostics::new());
    // undo the reversal the source applies across all commits
    dependencies.reverse();

    assert_eq!(
        names(&dependencies),
        vec!["common-library", "ingress-nginx", "plain-name"]
    );
    assert_eq!(dependencies[0].from, v("1.0.3"));
    assert_eq!(dependencies[0].to, v("1.0.4"));
    assert_eq!(dependencies[1].to.as_ref().unwrap().original(), "v4.8.0");
    assert_eq!(dependencies[2].to, v("2.0.0"));

    for dependency in &dependencies {
        assert_eq!(dependency.meta.pr.as_deref(), Some("77"));
        assert_eq!(dependency.meta.commit.as_deref(), Some("abc"));
    }
}

#[test]
fn falls_back_to_title_when_body_has_no_table() {
    let dependencies = parse_commit(
        &commit(
            "abc",
            "update dependency serde to v1.0.200 (#5)\n\nSome body text without a table.",
        ),
        &mut Diagnostics::new(),
    );

    assert_eq!(names(&dependencies), vec!["serde"]);
    assert_eq!(dependencies[0].meta.pr.as_deref(), Some("5"));
}

#[test_log::test]
fn source_filters_authors_and_orders_oldest_first() {
    let mut getter = MockCommitsGetter::new();
    getter.expect_commits().returning(|_| {
        let mut human = commit("3", "update the docs");
        human.author = "Jane Doe".into();
        Ok(vec![
            human,
            commit("2", TABLE_COMMIT),
            commit("1", "update dependency first to v1.0.0"),
        ])
    });

    let source = RenovateSource::new(&getter, CommitSourceConfig::default());
    let mut diagnostics = Diagnostics::new();
    let changelog = source.changelog(&mut diagnostics).unwrap();

    assert_eq!(
        names(&changelog.dependencies),
        vec!["first", "common-library", "ingress-nginx", "plain-name"]
    );
    assert!(
        diagnostics
            .entries()
            .iter()
            .any(|d| d.message.contains("is not renovate"))
    );
}
