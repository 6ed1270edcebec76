//! Window and monitor rectangles in physical desktop coordinates.

/// Outer window position and inner size, as saved before going fullscreen.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Area shared with `other`, zero when they do not touch.
    pub fn overlap_area(&self, other: &WindowGeometry) -> u64 {
        let left = self.x.max(other.x) as i64;
        let top = self.y.max(other.y) as i64;
        let right = (self.x as i64 + self.width as i64).min(other.x as i64 + other.width as i64);
        let bottom = (self.y as i64 + self.height as i64).min(other.y as i64 + other.height as i64);

        let w = (right - left).max(0) as u64;
        let h = (bottom - top).max(0) as u64;
        w * h
    }
}

/// A monitor's desktop rectangle. Same shape as a window rectangle.
pub type MonitorRect = WindowGeometry;

/// Index of the monitor the window overlaps the most.
///
/// Returns `None` when there are no monitors or the window touches none of
/// them. Ties keep the first monitor.
pub fn best_monitor(window: &WindowGeometry, monitors: &[MonitorRect]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;

    for (i, monitor) in monitors.iter().enumerate() {
        let area = window.overlap_area(monitor);
        if area > best.map_or(0, |(_, a)| a) {
            best = Some((i, area));
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: MonitorRect = MonitorRect::new(0, 0, 1920, 1080);
    const RIGHT: MonitorRect = MonitorRect::new(1920, 0, 2560, 1440);

    #[test]
    fn overlap_of_disjoint_rects_is_zero() {
        let w = WindowGeometry::new(5000, 5000, 100, 100);
        assert_eq!(w.overlap_area(&LEFT), 0);
    }

    #[test]
    fn overlap_of_contained_rect_is_its_area() {
        let w = WindowGeometry::new(100, 100, 800, 600);
        assert_eq!(w.overlap_area(&LEFT), 800 * 600);
    }

    #[test]
    fn picks_monitor_with_largest_overlap() {
        // 200px on the left monitor, 600px on the right one.
        let w = WindowGeometry::new(1720, 100, 800, 600);
        assert_eq!(best_monitor(&w, &[LEFT, RIGHT]), Some(1));

        let w = WindowGeometry::new(1320, 100, 800, 600);
        assert_eq!(best_monitor(&w, &[LEFT, RIGHT]), Some(0));
    }

    #[test]
    fn no_monitor_when_offscreen_or_empty() {
        let w = WindowGeometry::new(-5000, -5000, 800, 600);
        assert_eq!(best_monitor(&w, &[LEFT, RIGHT]), None);
        assert_eq!(best_monitor(&w, &[]), None);
    }

    #[test]
    fn negative_coordinates_overlap() {
        let above = MonitorRect::new(0, -1080, 1920, 1080);
        let w = WindowGeometry::new(0, -400, 800, 600);
        assert_eq!(best_monitor(&w, &[LEFT, above]), Some(1));
    }
}
