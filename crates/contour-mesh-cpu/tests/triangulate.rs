use contour_chunk::ChunkCells;
use contour_geom::{Vec2, signed_area2};
use contour_mesh_cpu::{ChunkNeighbors, SurfaceCache, triangulate_chunk};

fn chunk(res: usize, size: f32, occupied: &[(usize, usize)]) -> ChunkCells {
    let mut c = ChunkCells::new(res, size).unwrap();
    for &(x, y) in occupied {
        c.set_state(x, y, true);
    }
    c
}

fn full(res: usize, size: f32) -> ChunkCells {
    let mut c = ChunkCells::new(res, size).unwrap();
    c.fill(true);
    c
}

fn build(cells: &ChunkCells, nb: ChunkNeighbors<'_>) -> SurfaceCache {
    let mut s = SurfaceCache::new(cells.resolution());
    triangulate_chunk(cells, &nb, &mut s);
    s
}

fn tri_area_sum(s: &SurfaceCache) -> f32 {
    let v = s.vertices();
    s.indices()
        .chunks(3)
        .map(|t| {
            signed_area2(
                v[t[0] as usize].truncate(),
                v[t[1] as usize].truncate(),
                v[t[2] as usize].truncate(),
            ) * 0.5
        })
        .sum()
}

fn has_point(s: &SurfaceCache, p: Vec2) -> bool {
    s.vertices()
        .iter()
        .any(|v| v.truncate().distance(p) <= 1e-5)
}

#[test]
fn empty_chunk_emits_nothing() {
    let c = ChunkCells::new(8, 1.0).unwrap();
    let other = ChunkCells::new(8, 1.0).unwrap();
    let s = build(&c, ChunkNeighbors::new(Some(&other), Some(&other), Some(&other)));
    assert!(s.vertices().is_empty());
    assert!(s.indices().is_empty());
    assert!(s.surface().is_empty());
}

#[test]
fn full_standalone_chunk_is_one_quad_per_cell() {
    let r = 5;
    let c = full(r, 5.0);
    let s = build(&c, ChunkNeighbors::none());
    assert_eq!(s.vertices().len(), r * r);
    assert_eq!(s.surface().triangle_count(), 2 * (r - 1) * (r - 1));
    assert!((tri_area_sum(&s) - ((r - 1) * (r - 1)) as f32).abs() < 1e-3);
}

#[test]
fn full_chunk_with_neighbors_shares_every_corner() {
    let r = 4;
    let c = full(r, 4.0);
    let n = full(r, 4.0);
    let s = build(&c, ChunkNeighbors::new(Some(&n), Some(&n), Some(&n)));
    assert_eq!(s.vertices().len(), (r + 1) * (r + 1));
    assert_eq!(s.surface().triangle_count(), 2 * r * r);
    // No duplicate corner positions.
    let v = s.vertices();
    for i in 0..v.len() {
        for j in (i + 1)..v.len() {
            assert!(v[i].truncate().distance(v[j].truncate()) > 1e-4);
        }
    }
    assert!((tri_area_sum(&s) - (r * r) as f32).abs() < 1e-3);
}

#[test]
fn single_corner_case_emits_one_triangle() {
    let c = chunk(2, 2.0, &[(0, 0)]);
    let s = build(&c, ChunkNeighbors::none());
    assert_eq!(s.indices().len(), 3);
    assert_eq!(s.vertices().len(), 3);
    assert!(has_point(&s, Vec2::new(0.5, 0.5)));
    assert!(has_point(&s, Vec2::new(1.0, 0.5)));
    assert!(has_point(&s, Vec2::new(0.5, 1.0)));
    assert!(tri_area_sum(&s) > 0.0);
}

#[test]
fn diagonal_pair_stays_disconnected() {
    for occupied in [[(0, 0), (1, 1)], [(1, 0), (0, 1)]] {
        let c = chunk(2, 2.0, &occupied);
        let s = build(&c, ChunkNeighbors::none());
        assert_eq!(s.surface().triangle_count(), 2);
        // Two corners plus all four edge crossings, no centre vertex.
        assert_eq!(s.vertices().len(), 6);
        assert!(!has_point(&s, Vec2::new(1.0, 1.0)));
        assert!((tri_area_sum(&s) - 0.25).abs() < 1e-5);
    }
}

#[test]
fn three_corners_make_a_pentagon() {
    let c = chunk(2, 2.0, &[(0, 0), (1, 0), (0, 1)]);
    let s = build(&c, ChunkNeighbors::none());
    assert_eq!(s.vertices().len(), 5);
    assert_eq!(s.surface().triangle_count(), 3);
    assert!((tri_area_sum(&s) - 0.875).abs() < 1e-5);
}

#[test]
fn missing_neighbors_leave_boundary_open() {
    let r = 4;
    let c = full(r, 4.0);
    let s = build(&c, ChunkNeighbors::none());
    let last_center = (r as f32 - 1.0) + 0.5;
    for v in s.vertices() {
        assert!(v.x <= last_center + 1e-5);
        assert!(v.y <= last_center + 1e-5);
    }
}

#[test]
fn x_neighbor_adds_one_gap_column_only() {
    let r = 3;
    let c = full(r, 3.0);
    let n = full(r, 3.0);
    let s = build(&c, ChunkNeighbors::new(Some(&n), None, None));
    assert_eq!(s.vertices().len(), (r + 1) * r);
    assert_eq!(s.surface().triangle_count(), 2 * r * (r - 1));
    assert!(s.vertices().iter().all(|v| v.y <= 2.5 + 1e-5));
}

#[test]
fn seam_vertices_match_right_chunk() {
    let r = 4;
    let size = 2.0;
    // Filled rectangle spanning the seam: columns 2..=3 of the left chunk and
    // 0..=1 of the right chunk, rows 1..=2.
    let left = chunk(r, size, &[(2, 1), (3, 1), (2, 2), (3, 2)]);
    let right = chunk(r, size, &[(0, 1), (1, 1), (0, 2), (1, 2)]);
    let ls = build(&left, ChunkNeighbors::new(Some(&right), None, None));
    let rs = build(&right, ChunkNeighbors::none());

    let cell = size / r as f32;
    // Both sides are filled at the seam, so no crossing lands on it.
    assert!(!ls.vertices().iter().any(|v| (v.x - size).abs() < 1e-5));
    // Every left vertex in the ghost column exists in the right chunk, in world space.
    let ghost: Vec<Vec2> = ls
        .vertices()
        .iter()
        .map(|v| v.truncate())
        .filter(|p| p.x > size)
        .collect();
    assert!(!ghost.is_empty());
    for p in &ghost {
        let local = *p - Vec2::new(size, 0.0);
        assert!(has_point(&rs, local), "missing {:?}", local);
    }
    // And every right column-0 vertex appears in the left ghost column.
    for v in rs.vertices() {
        if (v.x - cell * 0.5).abs() < 1e-5 {
            let world = v.truncate() + Vec2::new(size, 0.0);
            assert!(ghost.iter().any(|g| g.distance(world) < 1e-5));
        }
    }
    // No gap: a 4×2 block of samples covers 4·2 cells minus four corner cuts of 1/8.
    let area = tri_area_sum(&ls) + tri_area_sum(&rs);
    assert!((area - 7.5 * cell * cell).abs() < 1e-4);
}

#[test]
fn rebuild_reuses_buffers_without_leftovers() {
    let mut c = full(4, 4.0);
    let mut s = SurfaceCache::new(4);
    triangulate_chunk(&c, &ChunkNeighbors::none(), &mut s);
    assert_eq!(s.vertices().len(), 16);
    c.fill(false);
    triangulate_chunk(&c, &ChunkNeighbors::none(), &mut s);
    assert!(s.vertices().is_empty());
    assert!(s.indices().is_empty());
}

#[test]
fn default_cache_is_resized_on_first_use() {
    let c = full(3, 3.0);
    let mut s = SurfaceCache::default();
    triangulate_chunk(&c, &ChunkNeighbors::none(), &mut s);
    assert_eq!(s.resolution(), 3);
    assert_eq!(s.surface().triangle_count(), 8);
}

#[test]
fn single_cell_chunk_stitches_through_all_neighbors() {
    let c = full(1, 1.0);
    let n = full(1, 1.0);
    let s = build(&c, ChunkNeighbors::new(Some(&n), Some(&n), Some(&n)));
    assert_eq!(s.vertices().len(), 4);
    assert_eq!(s.surface().triangle_count(), 2);
    assert!((tri_area_sum(&s) - 1.0).abs() < 1e-5);
}
