#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::geometry::{Point, Rect};
use crate::zone::{DropZone, ZoneId};

/// Resolve the drop candidate for the current geometry.
///
/// Only zones that contain `pointer` or intersect `dragged` qualify; among
/// those the zone whose center is nearest the dragged item's center wins.
/// Ties go to the zone registered first. Stateless: call it every move.
#[must_use]
pub fn closest_center(pointer: Point, dragged: Rect, zones: &[DropZone]) -> Option<ZoneId> {
    let item_center = dragged.center();
    let mut best: Option<(&DropZone, f64)> = None;
    for zone in zones {
        if !zone.rect.contains(pointer) && !zone.rect.intersects(&dragged) {
            continue;
        }
        let dist = item_center.distance_to(zone.rect.center());
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((zone, dist)),
        }
    }
    best.map(|(zone, _)| zone.id.clone())
}
