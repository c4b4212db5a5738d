//! Carousel layout
//!
//! Maps an item's index to its pseudo-3D placement. Pure: the same inputs
//! always give the same style.

/// Horizontal step between neighbouring positions, in percent of the track.
const STEP_PERCENT: f32 = 25.0;
const SCALE_STEP: f32 = 0.2;
const ROTATION_STEP_DEG: f32 = -25.0;
const DEPTH_STEP_PX: f32 = 120.0;
const TOP_Z_INDEX: i32 = 10;

/// Placement of one carousel item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Cyclic distance from the active item, in `[0, count)`.
    pub offset: usize,
    /// `offset - count / 2`.
    pub position: i32,
    /// Items further from the centre are drawn larger.
    pub scale: f32,
    pub left_percent: f32,
    pub z_index: i32,
    pub rotate_y_deg: f32,
    pub depth_px: f32,
}

impl ItemStyle {
    /// CSS `transform` value for a web renderer.
    pub fn css_transform(&self) -> String {
        format!(
            "translateX(-50%) scale({}) rotateY({}deg) translateZ({}px)",
            self.scale, self.rotate_y_deg, self.depth_px
        )
    }

    /// CSS `left` value.
    pub fn css_left(&self) -> String {
        format!("{}%", self.left_percent)
    }
}

/// Computes the style of item `index` when `active_index` is focused.
///
/// Returns `None` for an empty carousel.
pub fn item_style(index: usize, active_index: usize, count: usize) -> Option<ItemStyle> {
    if count == 0 {
        return None;
    }
    let index = index % count;
    let active_index = active_index % count;

    let offset = (index + count - active_index) % count;
    let position = offset as i32 - (count / 2) as i32;
    let distance = position.unsigned_abs() as f32;

    Some(ItemStyle {
        offset,
        position,
        scale: 1.0 + distance * SCALE_STEP,
        left_percent: 50.0 + position as f32 * STEP_PERCENT,
        z_index: TOP_Z_INDEX - position.abs(),
        rotate_y_deg: position as f32 * ROTATION_STEP_DEG,
        depth_px: -distance * DEPTH_STEP_PX,
    })
}

/// Styles of every item, in index order.
pub fn layout(active_index: usize, count: usize) -> Vec<ItemStyle> {
    (0..count)
        .filter_map(|index| item_style(index, active_index, count))
        .collect()
}

/// Item indices ordered back to front, for painters without z-buffering.
pub fn paint_order(active_index: usize, count: usize) -> Vec<usize> {
    let mut order: Vec<(usize, i32)> = layout(active_index, count)
        .into_iter()
        .enumerate()
        .map(|(index, style)| (index, style.z_index))
        .collect();
    order.sort_by_key(|&(index, z)| (z, index));
    order.into_iter().map(|(index, _)| index).collect()
}
