use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use hq_app::usecases::titlebar::MenuView;
use hq_app::{ShortcutLabelCache, ShortcutRegistry, Titlebar, WindowChromeController};
use hq_core::ports::{
    GlobalShortcutPort, ResizeCallback, ResizeSubscription, WindowHostPort, WindowStateEmitter,
};
use hq_core::{Accelerator, MenuItem, ShortcutAction, WindowState};

struct StaticWindowHost {
    released: Arc<AtomicUsize>,
}

#[async_trait]
impl WindowHostPort for StaticWindowHost {
    async fn is_maximized(&self) -> Result<bool> {
        Ok(true)
    }

    async fn subscribe_resize(&self, _callback: ResizeCallback) -> Result<ResizeSubscription> {
        let released = self.released.clone();
        Ok(ResizeSubscription::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        }))
    }

    async fn minimize(&self) -> Result<()> {
        Ok(())
    }

    async fn toggle_maximize(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct NullEmitter;

impl WindowStateEmitter for NullEmitter {
    fn emit_window_state(&self, _state: WindowState) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingShortcutHost {
    ops: Mutex<Vec<String>>,
}

#[async_trait]
impl GlobalShortcutPort for RecordingShortcutHost {
    async fn register(&self, accelerator: &Accelerator, _action: ShortcutAction) -> Result<()> {
        self.ops.lock().unwrap().push(format!("register {accelerator}"));
        Ok(())
    }

    async fn unregister(&self, accelerator: &Accelerator) -> Result<()> {
        self.ops.lock().unwrap().push(format!("unregister {accelerator}"));
        Ok(())
    }

    async fn display_label(&self, accelerator: &Accelerator) -> Result<String> {
        Ok(accelerator.as_str().replace("CmdOrCtrl", "Ctrl"))
    }
}

struct Fixture {
    titlebar: Titlebar,
    shortcuts: Arc<RecordingShortcutHost>,
    released: Arc<AtomicUsize>,
}

fn fixture(shortcuts_enabled: bool) -> Fixture {
    let released = Arc::new(AtomicUsize::new(0));
    let chrome = Arc::new(WindowChromeController::new(
        Arc::new(StaticWindowHost {
            released: released.clone(),
        }),
        Arc::new(NullEmitter),
    ));
    let shortcuts = Arc::new(RecordingShortcutHost::default());
    let port = shortcuts.clone() as Arc<dyn GlobalShortcutPort>;
    let titlebar = Titlebar::new(
        chrome,
        ShortcutRegistry::new(port.clone()).arc(),
        Arc::new(ShortcutLabelCache::new(port)),
    )
    .with_shortcuts_enabled(shortcuts_enabled);
    Fixture {
        titlebar,
        shortcuts,
        released,
    }
}

fn key(text: &str) -> Accelerator {
    Accelerator::parse(text).unwrap()
}

fn counting(counter: &Arc<AtomicUsize>) -> ShortcutAction {
    let counter = counter.clone();
    Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn file_menu(quit: &Arc<AtomicUsize>) -> Vec<MenuItem> {
    vec![
        MenuItem::new("new", "New Window", Arc::new(|| {})).with_shortcut(key("CmdOrCtrl+N")),
        MenuItem::new("settings", "Settings", Arc::new(|| {})),
        MenuItem::new("quit", "Quit", counting(quit)).with_shortcut(key("CmdOrCtrl+Q")),
    ]
}

async fn resolved_menus(titlebar: &Titlebar) -> Vec<MenuView> {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let menus = titlebar.menus().await;
            let pending = menus
                .iter()
                .flat_map(|menu| &menu.items)
                .any(|item| item.shortcut.is_some() && item.shortcut_label.is_none());
            if !pending {
                return menus;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("shortcut labels never resolved")
}

#[tokio::test]
async fn menus_keep_display_order_and_resolve_labels() {
    let fx = fixture(true);
    let quit = Arc::new(AtomicUsize::new(0));
    fx.titlebar.mount().await;
    fx.titlebar.set_menu("file", file_menu(&quit)).await;

    let menus = resolved_menus(&fx.titlebar).await;

    assert_eq!(menus.len(), 1);
    let ids: Vec<&str> = menus[0].items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "settings", "quit"]);
    assert_eq!(menus[0].items[0].shortcut.as_deref(), Some("CmdOrCtrl+N"));
    assert_eq!(menus[0].items[0].shortcut_label.as_deref(), Some("Ctrl+N"));
    assert_eq!(menus[0].items[1].shortcut, None);
    assert_eq!(menus[0].items[1].shortcut_label, None);
}

#[tokio::test]
async fn shared_shortcut_across_menus_registers_once() {
    let fx = fixture(true);
    let quit = Arc::new(AtomicUsize::new(0));
    fx.titlebar.set_menu("file", file_menu(&quit)).await;
    fx.titlebar
        .set_menu(
            "window",
            vec![MenuItem::new("quit", "Quit", counting(&quit)).with_shortcut(key("CmdOrCtrl+Q"))],
        )
        .await;
    fx.titlebar.set_menu("file", file_menu(&quit)).await;

    let ops = fx.shortcuts.ops.lock().unwrap().clone();
    assert_eq!(
        ops.iter().filter(|op| *op == "register CmdOrCtrl+Q").count(),
        1
    );
    assert_eq!(
        ops.iter().filter(|op| *op == "register CmdOrCtrl+N").count(),
        1
    );
}

#[tokio::test]
async fn activate_runs_the_item_action() {
    let fx = fixture(true);
    let quit = Arc::new(AtomicUsize::new(0));
    fx.titlebar.set_menu("file", file_menu(&quit)).await;

    assert!(fx.titlebar.activate("file", "quit").await);
    assert!(!fx.titlebar.activate("file", "missing").await);
    assert!(!fx.titlebar.activate("edit", "quit").await);
    assert_eq!(quit.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn removing_a_menu_releases_only_its_keys() {
    let fx = fixture(true);
    let quit = Arc::new(AtomicUsize::new(0));
    fx.titlebar.set_menu("file", file_menu(&quit)).await;
    fx.titlebar
        .set_menu(
            "window",
            vec![MenuItem::new("quit", "Quit", counting(&quit)).with_shortcut(key("CmdOrCtrl+Q"))],
        )
        .await;

    assert!(fx.titlebar.remove_menu("file").await);

    let ops = fx.shortcuts.ops.lock().unwrap().clone();
    assert!(ops.contains(&"unregister CmdOrCtrl+N".to_string()));
    assert!(!ops.contains(&"unregister CmdOrCtrl+Q".to_string()));
    assert_eq!(fx.titlebar.menus().await.len(), 1);
}

#[tokio::test]
async fn unmount_releases_subscription_and_every_shortcut() {
    let fx = fixture(true);
    let quit = Arc::new(AtomicUsize::new(0));
    assert!(fx.titlebar.mount().await.is_maximized);
    fx.titlebar.set_menu("file", file_menu(&quit)).await;

    fx.titlebar.unmount().await;

    let ops = fx.shortcuts.ops.lock().unwrap().clone();
    assert!(ops.contains(&"unregister CmdOrCtrl+N".to_string()));
    assert!(ops.contains(&"unregister CmdOrCtrl+Q".to_string()));
    assert_eq!(fx.released.load(Ordering::SeqCst), 1);
    assert!(fx.titlebar.menus().await.is_empty());
}

#[tokio::test]
async fn disabled_shortcuts_never_reach_the_host() {
    let fx = fixture(false);
    let quit = Arc::new(AtomicUsize::new(0));

    fx.titlebar.set_menu("file", file_menu(&quit)).await;
    let menus = resolved_menus(&fx.titlebar).await;

    assert!(fx.shortcuts.ops.lock().unwrap().is_empty());
    assert_eq!(menus[0].items[2].shortcut_label.as_deref(), Some("Ctrl+Q"));
}
