mod route;
pub use route::RouteExt;

mod spinner;
pub use spinner::Spinner;

mod banner;
pub use banner::Banner;

mod layout;
pub use layout::Layout;

mod status;
pub use status::render_status_badge;

pub mod events;

mod input;
pub use input::{render_field, render_input};

mod table;
pub use table::{render_empty_state, render_experience, render_table_head, render_table_loading};
