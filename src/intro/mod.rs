pub(crate) mod decrypt;
pub(crate) mod hero;
pub(crate) mod preloader;
