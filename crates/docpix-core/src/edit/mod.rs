pub mod notify;
pub mod rotate;
pub mod session;

pub use notify::{LogNotifier, Notifier};
pub use rotate::ImageState;
pub use session::{CropCommit, EditorSession, PointerEvent};
