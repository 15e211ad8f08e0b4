pub mod error;
pub mod menu;
pub mod update;
pub mod window;

pub use error::map_err;
pub use menu::{
    activate_menu_item, get_titlebar_menus, remove_titlebar_menu, set_titlebar_menu, MenuItemDto,
};
pub use update::{dismiss_update_dialog, get_update_dialog, install_update, open_update_dialog};
pub use window::{close_window, get_window_state, minimize_window, toggle_maximize_window};
