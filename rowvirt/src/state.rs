/// A lightweight, serializable snapshot of the viewport geometry and scroll position.
///
/// Useful for restoring a table's scroll position across frames or view switches without
/// coupling the window to any UI framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub scroll_top: u64,
    pub viewport_height: u32,
}
