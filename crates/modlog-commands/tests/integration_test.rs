//! Integration tests for the modlog-commands crate.
//!
//! These exercise the command tree and the cog operations behind `sudo`
//! against the real logging cogs.

use modlog_cogs::{Cog, EventRouter, LogChannelResolver, MemoryLogChannelStore, ServerLog, VoiceLog};
use modlog_commands::sudo::{run_cog_operation, OK_REPLY};
use modlog_commands::{commands, create_framework, Lifecycle};
use modlog_common::test_utils::init_test_logging;
use std::sync::Arc;

fn router() -> EventRouter {
    let resolver = Arc::new(LogChannelResolver::new(Arc::new(MemoryLogChannelStore::new())));
    EventRouter::new(vec![
        Arc::new(ServerLog::new(Arc::clone(&resolver))) as Arc<dyn Cog>,
        Arc::new(VoiceLog::new(resolver)),
    ])
}

#[test]
fn test_framework_builds_with_custom_prefix() {
    init_test_logging();
    let _builder = create_framework("?");
    assert_eq!(commands().len(), 2);
}

#[test]
fn test_unload_then_load_all_cogs() {
    let router = router();

    let replies = run_cog_operation(&router, None, EventRouter::unload);
    assert_eq!(replies, vec![OK_REPLY.to_string(), OK_REPLY.to_string()]);
    assert!(!router.is_loaded("server_log"));
    assert!(!router.is_loaded("voice_log"));

    let replies = run_cog_operation(&router, Some("voice_log"), EventRouter::load);
    assert_eq!(replies, vec![OK_REPLY.to_string()]);
    assert!(router.is_loaded("voice_log"));
}

#[test]
fn test_reload_of_unloaded_cog_fails() {
    let router = router();
    router.unload("server_log").unwrap();

    let replies = run_cog_operation(&router, Some("server_log"), EventRouter::reload);
    assert_eq!(replies, vec!["```\nCog 'server_log' is not loaded\n```".to_string()]);
}

#[test]
fn test_restart_request_survives_until_taken() {
    let lifecycle = Lifecycle::new();
    lifecycle.request_restart();
    lifecycle.request_restart();
    assert!(lifecycle.take_restart());
    assert!(!lifecycle.take_restart());
}
