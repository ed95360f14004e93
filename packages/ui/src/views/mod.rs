mod page;

mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod home;
pub use home::HomeView;

mod client;
pub use client::{ClientDetail, ClientManager};

mod community;
pub use community::{CommunityDetail, CommunityManager};

mod unit;
pub use unit::{UnitDetail, UnitManager};

mod resident;
pub use resident::{ResidentDetail, ResidentManager};

mod staff;
pub use staff::StaffManager;

mod console;
pub use console::ConsoleView;
