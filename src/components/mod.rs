pub mod event_form;
pub mod month_view;

pub use event_form::EventForm;
pub use month_view::MonthView;
