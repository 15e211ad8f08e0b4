use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use hq_app::usecases::shortcuts::{Acquired, ShortcutLabelCache, ShortcutRegistry, ShortcutScope};
use hq_core::ports::GlobalShortcutPort;
use hq_core::{Accelerator, HostPlatform, MenuItem, ShortcutAction, ShortcutBinding};

#[derive(Default)]
struct FakeShortcutHost {
    ops: Mutex<Vec<(&'static str, String)>>,
    actions: Mutex<Vec<(String, ShortcutAction)>>,
    failing: Mutex<HashSet<String>>,
    label_calls: AtomicUsize,
}

impl FakeShortcutHost {
    fn count(&self, op: &str, key: &str) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, k)| *o == op && k == key)
            .count()
    }

    fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn press(&self, key: &str) {
        let action = self
            .actions
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, action)| action.clone());
        if let Some(action) = action {
            action();
        }
    }
}

#[async_trait]
impl GlobalShortcutPort for FakeShortcutHost {
    async fn register(&self, accelerator: &Accelerator, action: ShortcutAction) -> Result<()> {
        let key = accelerator.to_string();
        if self.failing.lock().unwrap().contains(&key) {
            return Err(anyhow!("HotKey already registered"));
        }
        self.ops.lock().unwrap().push(("register", key.clone()));
        self.actions.lock().unwrap().push((key, action));
        Ok(())
    }

    async fn unregister(&self, accelerator: &Accelerator) -> Result<()> {
        let key = accelerator.to_string();
        self.ops.lock().unwrap().push(("unregister", key.clone()));
        self.actions.lock().unwrap().retain(|(k, _)| *k != key);
        Ok(())
    }

    async fn display_label(&self, accelerator: &Accelerator) -> Result<String> {
        self.label_calls.fetch_add(1, Ordering::SeqCst);
        if accelerator.key() == "F13" {
            return Err(anyhow!("no label for key"));
        }
        Ok(format!("<{accelerator}>"))
    }
}

fn key(text: &str) -> Accelerator {
    Accelerator::parse(text).unwrap()
}

fn counter_action(counter: &Arc<AtomicUsize>) -> ShortcutAction {
    let counter = counter.clone();
    Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn noop() -> ShortcutAction {
    Arc::new(|| {})
}

fn fixtures() -> (Arc<FakeShortcutHost>, Arc<ShortcutRegistry>) {
    let host = Arc::new(FakeShortcutHost::default());
    let registry = ShortcutRegistry::new(host.clone() as Arc<dyn GlobalShortcutPort>).arc();
    (host, registry)
}

#[tokio::test]
async fn same_key_registered_twice_reaches_host_once() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry.clone(), "file");
    let binding = ShortcutBinding::new(key("CmdOrCtrl+S"), noop());

    assert!(scope.register(&binding).await);
    assert!(!scope.register(&binding).await);

    assert_eq!(host.count("register", "CmdOrCtrl+S"), 1);
    assert_eq!(registry.ref_count(&key("CmdOrCtrl+S")).await, 1);
}

#[tokio::test]
async fn equivalent_spellings_share_one_registration() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry, "edit");

    scope
        .register(&ShortcutBinding::new(key("Shift+Ctrl+K"), noop()))
        .await;
    scope
        .register(&ShortcutBinding::new(key("ctrl+shift+k"), noop()))
        .await;

    assert_eq!(host.count("register", "Ctrl+Shift+K"), 1);
}

#[tokio::test]
async fn scopes_sharing_a_key_register_and_unregister_once() {
    let (host, registry) = fixtures();
    let file = ShortcutScope::new(registry.clone(), "file");
    let window = ShortcutScope::new(registry.clone(), "window");
    let quit = key("CmdOrCtrl+Q");

    file.register(&ShortcutBinding::new(quit.clone(), noop())).await;
    window.register(&ShortcutBinding::new(quit.clone(), noop())).await;
    assert_eq!(host.count("register", "CmdOrCtrl+Q"), 1);
    assert_eq!(registry.ref_count(&quit).await, 2);

    file.release().await;
    assert_eq!(host.count("unregister", "CmdOrCtrl+Q"), 0);

    window.release().await;
    assert_eq!(host.count("unregister", "CmdOrCtrl+Q"), 1);
    assert!(registry.registered_keys().await.is_empty());
}

#[tokio::test]
async fn first_registered_action_wins() {
    let (host, registry) = fixtures();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let (a, b) = (registry.new_owner(), registry.new_owner());

    let outcome = registry
        .acquire(a, &ShortcutBinding::new(key("Alt+N"), counter_action(&first)))
        .await
        .unwrap();
    assert_eq!(outcome, Acquired::Registered);
    let outcome = registry
        .acquire(b, &ShortcutBinding::new(key("Alt+N"), counter_action(&second)))
        .await
        .unwrap();
    assert_eq!(outcome, Acquired::Shared);

    host.press("Alt+N");

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(host.count("register", "Alt+N"), 1);
}

#[tokio::test]
async fn released_owner_hands_the_key_to_the_next_owner() {
    let (host, registry) = fixtures();
    let file_hits = Arc::new(AtomicUsize::new(0));
    let window_hits = Arc::new(AtomicUsize::new(0));
    let file = ShortcutScope::new(registry.clone(), "file");
    let window = ShortcutScope::new(registry.clone(), "window");

    file.sync(&[MenuItem::new("find", "Find", counter_action(&file_hits))
        .with_shortcut(key("Ctrl+K"))])
        .await;
    window
        .sync(&[MenuItem::new("palette", "Palette", counter_action(&window_hits))
            .with_shortcut(key("Ctrl+K"))])
        .await;

    file.release().await;
    assert_eq!(host.count("register", "Ctrl+K"), 1);
    assert_eq!(host.count("unregister", "Ctrl+K"), 0);

    host.press("Ctrl+K");
    assert_eq!(file_hits.load(Ordering::SeqCst), 0);
    assert_eq!(window_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn key_moved_to_another_item_fires_the_new_item() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry, "edit");
    let old_hits = Arc::new(AtomicUsize::new(0));
    let new_hits = Arc::new(AtomicUsize::new(0));

    scope
        .sync(&[MenuItem::new("cut", "Cut", counter_action(&old_hits)).with_shortcut(key("Alt+X"))])
        .await;
    let report = scope
        .sync(&[
            MenuItem::new("cut", "Cut", counter_action(&old_hits)),
            MenuItem::new("exit", "Exit", counter_action(&new_hits)).with_shortcut(key("Alt+X")),
        ])
        .await;

    assert_eq!(report.kept, vec![key("Alt+X")]);
    assert_eq!(host.count("register", "Alt+X"), 1);
    host.press("Alt+X");
    assert_eq!(old_hits.load(Ordering::SeqCst), 0);
    assert_eq!(new_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cmd_or_ctrl_and_ctrl_share_one_registration_on_linux() {
    let (host, registry) = fixtures();
    let a = ShortcutScope::new(registry.clone(), "file");
    let b = ShortcutScope::new(registry.clone(), "window");
    let cmd_or_ctrl = Accelerator::parse_for("CmdOrCtrl+K", HostPlatform::Linux).unwrap();
    let ctrl = Accelerator::parse_for("Ctrl+K", HostPlatform::Linux).unwrap();

    assert!(a.register(&ShortcutBinding::new(cmd_or_ctrl, noop())).await);
    assert!(b.register(&ShortcutBinding::new(ctrl.clone(), noop())).await);

    assert_eq!(host.ops.lock().unwrap().len(), 1);
    assert_eq!(registry.ref_count(&ctrl).await, 2);

    a.release().await;
    b.release().await;
    assert_eq!(host.count("unregister", "CmdOrCtrl+K"), 1);
    assert!(registry.registered_keys().await.is_empty());
}

#[tokio::test]
async fn sync_reinvocation_does_not_reregister() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry, "file");
    let items = vec![
        MenuItem::new("new", "New", noop()).with_shortcut(key("CmdOrCtrl+N")),
        MenuItem::new("open", "Open", noop()).with_shortcut(key("CmdOrCtrl+O")),
        MenuItem::new("about", "About", noop()),
    ];

    let first = scope.sync(&items).await;
    let second = scope.sync(&items).await;

    assert_eq!(first.added.len(), 2);
    assert!(second.added.is_empty());
    assert_eq!(second.kept, vec![key("CmdOrCtrl+N"), key("CmdOrCtrl+O")]);
    assert_eq!(host.count("register", "CmdOrCtrl+N"), 1);
    assert_eq!(host.count("register", "CmdOrCtrl+O"), 1);
}

#[tokio::test]
async fn sync_releases_keys_no_longer_declared() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry, "file");
    scope
        .sync(&[
            MenuItem::new("new", "New", noop()).with_shortcut(key("CmdOrCtrl+N")),
            MenuItem::new("open", "Open", noop()).with_shortcut(key("CmdOrCtrl+O")),
        ])
        .await;

    let report = scope
        .sync(&[MenuItem::new("new", "New", noop()).with_shortcut(key("CmdOrCtrl+N"))])
        .await;

    assert_eq!(report.removed, vec![key("CmdOrCtrl+O")]);
    assert_eq!(host.count("unregister", "CmdOrCtrl+O"), 1);
    assert_eq!(scope.keys().await, vec![key("CmdOrCtrl+N")]);
}

#[tokio::test]
async fn duplicate_keys_within_one_menu_are_ignored() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry, "edit");
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let report = scope
        .sync(&[
            MenuItem::new("undo", "Undo", counter_action(&first)).with_shortcut(key("CmdOrCtrl+Z")),
            MenuItem::new("undo2", "Undo again", counter_action(&second))
                .with_shortcut(key("CmdOrCtrl+Z")),
        ])
        .await;

    assert_eq!(report.added, vec![key("CmdOrCtrl+Z")]);
    assert_eq!(host.count("register", "CmdOrCtrl+Z"), 1);
    host.press("CmdOrCtrl+Z");
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn host_failure_rolls_back_and_later_sync_retries() {
    let (host, registry) = fixtures();
    host.fail("CmdOrCtrl+P");
    let scope = ShortcutScope::new(registry.clone(), "file");
    let items = vec![MenuItem::new("print", "Print", noop()).with_shortcut(key("CmdOrCtrl+P"))];

    let report = scope.sync(&items).await;
    assert_eq!(report.failed, vec![key("CmdOrCtrl+P")]);
    assert_eq!(registry.ref_count(&key("CmdOrCtrl+P")).await, 0);
    assert!(scope.keys().await.is_empty());

    host.heal();
    let report = scope.sync(&items).await;
    assert_eq!(report.added, vec![key("CmdOrCtrl+P")]);
    assert_eq!(host.count("register", "CmdOrCtrl+P"), 1);
}

#[tokio::test]
async fn dropping_a_scope_releases_its_keys() {
    let (host, registry) = fixtures();
    let scope = ShortcutScope::new(registry.clone(), "view");
    scope
        .register(&ShortcutBinding::new(key("F11"), noop()))
        .await;

    drop(scope);

    tokio::time::timeout(Duration::from_secs(2), async {
        while host.count("unregister", "F11") == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("scope drop did not release its shortcuts");
    assert_eq!(registry.ref_count(&key("F11")).await, 0);
}

#[tokio::test]
async fn label_is_a_placeholder_until_resolved_then_memoised() {
    let host = Arc::new(FakeShortcutHost::default());
    let cache = ShortcutLabelCache::new(host.clone() as Arc<dyn GlobalShortcutPort>);
    let save = key("CmdOrCtrl+S");

    assert_eq!(cache.label(&save), None);

    assert_eq!(cache.resolve(&save).await, "<CmdOrCtrl+S>");
    assert_eq!(cache.resolve(&save).await, "<CmdOrCtrl+S>");
    assert_eq!(cache.label(&save).as_deref(), Some("<CmdOrCtrl+S>"));
    assert_eq!(host.label_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn label_failure_falls_back_to_accelerator_text() {
    let host = Arc::new(FakeShortcutHost::default());
    let cache = ShortcutLabelCache::new(host as Arc<dyn GlobalShortcutPort>);

    assert_eq!(cache.resolve(&key("Shift+F13")).await, "Shift+F13");
}
