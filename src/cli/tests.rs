use super::*;

#[test]
fn no_arguments_summons() {
    assert_eq!(parse_invocation(["mahoraga"]), Invocation::Summon);
}

#[test]
fn summon_subcommand_summons() {
    assert_eq!(parse_invocation(["mahoraga", "summon"]), Invocation::Summon);
}

#[test]
fn only_the_first_argument_decides() {
    assert_eq!(
        parse_invocation(["mahoraga", "summon", "extra"]),
        Invocation::Summon
    );
    assert_eq!(parse_invocation(["mahoraga", "summon", "-v"]), Invocation::Summon);
    assert_eq!(
        parse_invocation(["mahoraga", "-v", "extra"]),
        Invocation::PrintVersion(version_string())
    );
    assert!(matches!(
        parse_invocation(["mahoraga", "--help", "banish"]),
        Invocation::PrintHelp(_)
    ));
    assert_eq!(
        parse_invocation(["mahoraga", "banish", "summon"]),
        Invocation::Unknown("banish".to_string())
    );
}

#[test]
fn help_flags_print_usage_and_in_app_commands() {
    for flag in ["--help", "-h"] {
        let Invocation::PrintHelp(help) = parse_invocation(["mahoraga", flag]) else {
            panic!("{flag} should print help");
        };
        assert!(help.contains("summon"), "{help}");
        assert!(help.contains("--version"), "{help}");
        assert!(help.contains("/settings"), "{help}");
        assert!(help.contains("/exit"), "{help}");
        assert!(help.contains("Ctrl+C"), "{help}");
    }
}

#[test]
fn version_flags_print_version() {
    for flag in ["--version", "-v"] {
        let invocation = parse_invocation(["mahoraga", flag]);
        assert_eq!(invocation, Invocation::PrintVersion(version_string()));
    }
}

#[test]
fn version_string_names_the_crate_version() {
    let version = version_string();
    assert!(version.starts_with(&format!("mahoraga v{} (", env!("CARGO_PKG_VERSION"))));
    assert!(version.ends_with(')'));

    let describe = version
        .rsplit_once(" (")
        .map(|(_, rest)| rest.trim_end_matches(')'))
        .expect("describe suffix");
    assert!(!describe.is_empty());
    assert!(!describe.contains("VERGEN"), "{version}");
}

#[test]
fn missing_or_placeholder_describe_reads_unknown() {
    assert_eq!(git_describe(None), "unknown");
    assert_eq!(git_describe(Some("")), "unknown");
    assert_eq!(git_describe(Some("VERGEN_IDEMPOTENT_OUTPUT")), "unknown");
    assert_eq!(git_describe(Some("v1.0.0-3-gabc1234")), "v1.0.0-3-gabc1234");
}

#[test]
fn anything_else_is_unknown() {
    assert_eq!(
        parse_invocation(["mahoraga", "banish"]),
        Invocation::Unknown("banish".to_string())
    );
    assert_eq!(
        parse_invocation(["mahoraga", "--frobnicate"]),
        Invocation::Unknown("--frobnicate".to_string())
    );
    assert_eq!(
        parse_invocation(["mahoraga", "help"]),
        Invocation::Unknown("help".to_string())
    );
}
