use super::*;

use kurbo::Point;

#[test]
fn dirty_cell_accumulates_and_takes() {
    let cell = DirtyCell::new();
    assert!(cell.peek().is_empty());

    cell.mark(DirtyFlags::SHAPE);
    cell.mark(DirtyFlags::MASK);
    assert_eq!(cell.peek(), DirtyFlags::SHAPE | DirtyFlags::MASK);

    assert_eq!(cell.take(), DirtyFlags::SHAPE | DirtyFlags::MASK);
    assert!(cell.peek().is_empty());
}

#[test]
fn dirty_cell_clones_share_state() {
    let owner_side = DirtyCell::new();
    let leaf_side = owner_side.clone();
    leaf_side.mark(DirtyFlags::MASK);
    assert_eq!(owner_side.take(), DirtyFlags::MASK);
}

#[test]
fn base_layout_merges_and_clears() {
    let mut base = NodeBase::new();
    base.mark_dirty(DirtyFlags::SHAPE);

    let transform = Affine::translate((3.0, 4.0));
    let merged = base.layout(&transform, DirtyFlags::MASK);
    assert_eq!(merged, DirtyFlags::SHAPE | DirtyFlags::MASK);
    assert!(base.dirty().is_empty());
    assert_eq!(base.world_transform(), transform);

    // Nothing left to contribute on the next pass.
    let merged = base.layout(&transform, DirtyFlags::empty());
    assert!(merged.is_empty());
}

#[test]
fn base_visibility_follows_alpha_and_hidden() {
    let mut base = NodeBase::new();
    assert!(base.base_visible());

    base.set_alpha(0.0);
    assert!(!base.base_visible());

    base.set_alpha(0.5);
    base.set_hidden(true);
    assert!(!base.base_visible());

    base.set_hidden(false);
    assert!(base.base_visible());
}

#[test]
fn owners_register_and_unregister_by_identity() {
    let mut base = NodeBase::new();
    let a = DirtyCell::new();
    let b = DirtyCell::new();
    base.add_owner(a.clone());
    base.add_owner(b.clone());
    assert_eq!(base.owner_count(), 2);

    base.mark_owners(DirtyFlags::MASK);
    assert_eq!(a.peek(), DirtyFlags::MASK);
    assert_eq!(b.peek(), DirtyFlags::MASK);

    assert!(base.remove_owner(&a));
    assert!(!base.remove_owner(&a));
    assert_eq!(base.owner_count(), 1);
}

#[test]
fn toggling_pixel_mode_drops_memo() {
    let mut base = NodeBase::new();
    base.set_pixel_hit_test(true);
    base.set_memo(HitMemo {
        point: Point::new(1.0, 1.0),
        hit: true,
    });
    assert!(base.memo().is_some());

    base.set_pixel_hit_test(false);
    assert!(base.memo().is_none());
}
