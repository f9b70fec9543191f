mod app;
pub use app::ListPlayer;
