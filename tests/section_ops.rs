// tests/section_ops.rs

mod common;

use common::TestEnv;

use formsmith_lib::command;

#[test]
fn expand_section_double_toggle_is_identity() {
    let env = TestEnv::new("intake");

    command::expand_section(&env.state, &env.ctx, "address").expect("open");
    {
        let form = env.state.form.lock().unwrap();
        assert!(form.expanded_sections.contains("address"));
        assert_eq!(form.active_section.as_deref(), Some("address"));
    }

    command::expand_section(&env.state, &env.ctx, "address").expect("close");
    {
        let form = env.state.form.lock().unwrap();
        assert!(!form.expanded_sections.contains("address"));
        // Still the most recently touched section.
        assert_eq!(form.active_section.as_deref(), Some("address"));
    }
}

#[test]
fn expand_all_overwrites_with_exact_config_ids() {
    let env = TestEnv::new("intake");

    command::expand_section(&env.state, &env.ctx, "personal").expect("open one");
    command::expand_all(&env.state, &env.ctx).expect("expand all");

    let form = env.state.form.lock().unwrap();
    let ids: Vec<&str> = form.expanded_sections.iter().map(|s| s.as_str()).collect();
    assert_eq!(ids, vec!["address", "personal", "preferences"]);
}

#[test]
fn collapse_all_empties_the_set() {
    let env = TestEnv::new("intake");

    command::expand_all(&env.state, &env.ctx).expect("expand all");
    command::collapse_all(&env.state, &env.ctx).expect("collapse all");

    let form = env.state.form.lock().unwrap();
    assert!(form.expanded_sections.is_empty());
}

#[test]
fn scroll_to_known_section_sets_active_and_pending() {
    let env = TestEnv::new("intake");

    command::scroll_to_section(&env.state, &env.ctx, "preferences").expect("scroll");
    {
        let form = env.state.form.lock().unwrap();
        assert_eq!(form.active_section.as_deref(), Some("preferences"));
        assert_eq!(form.pending_scroll.as_deref(), Some("preferences"));
    }

    // The renderer consumes the request exactly once.
    assert_eq!(
        command::take_pending_scroll(&env.state).as_deref(),
        Some("preferences")
    );
    assert_eq!(command::take_pending_scroll(&env.state), None);
}

#[test]
fn scroll_to_unknown_section_is_a_no_op() {
    let env = TestEnv::new("intake");

    command::scroll_to_section(&env.state, &env.ctx, "personal").expect("scroll");
    command::scroll_to_section(&env.state, &env.ctx, "nope").expect("unknown id");

    let form = env.state.form.lock().unwrap();
    assert_eq!(form.active_section.as_deref(), Some("personal"));
    assert_eq!(form.pending_scroll.as_deref(), Some("personal"));
    assert!(form.changes.is_empty());
}

#[test]
fn edit_mode_flips_without_persisting() {
    let env = TestEnv::new("intake");

    command::set_edit_mode(&env.state, true).expect("enable");
    assert!(env.state.form.lock().unwrap().edit_mode);

    let reopened = env.reopen("intake");
    assert!(!reopened.state.form.lock().unwrap().edit_mode);
}
