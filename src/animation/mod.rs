pub(crate) mod ease;
pub(crate) mod handle;
pub(crate) mod playback;
pub(crate) mod timeline;
pub(crate) mod tween;
