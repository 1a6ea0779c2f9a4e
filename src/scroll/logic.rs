//! Scroll-and-recycle movement: fixed respawn for tiles, randomized and
//! cluster-coherent respawn for clouds.

use super::types::*;
use crate::core::constants::{
    CLOUD_RESPAWN_SPREAD_PX, RECYCLE_BOUNDARY, RESPAWN_X, RESPAWN_X_PX, VIEWPORT_HEIGHT_PX,
};
use rand::Rng;

/// True once an entity has moved past the left recycle boundary.
pub fn has_exited(entity: &ScrollEntity) -> bool {
    entity.x < RECYCLE_BOUNDARY
}

/// Move an entity left by `speed` (negative) and recycle it to the fixed
/// respawn coordinate once it crosses the left boundary.
pub fn advance(entity: &mut ScrollEntity, speed: f64) {
    entity.x += speed;
    if has_exited(entity) {
        entity.x = RESPAWN_X;
    }
}

/// Draw a fresh respawn position: x in `[RESPAWN_X, RESPAWN_X + 500]`,
/// y in `[0, VIEWPORT_HEIGHT / 2]`.
pub fn random_respawn_position<R: Rng>(rng: &mut R) -> (f64, f64) {
    let y = rng.gen_range(0..=VIEWPORT_HEIGHT_PX) as f64 / 2.0;
    let x = rng.gen_range(RESPAWN_X_PX..=RESPAWN_X_PX + CLOUD_RESPAWN_SPREAD_PX) as f64;
    (x, y)
}

/// Move an entity left and, on crossing the boundary, respawn it at a
/// position chosen by cluster policy.
///
/// Non-anchor members reuse their cluster's cached position when one exists.
/// Anchors (and members whose cluster has no cached entry yet) generate a new
/// position and publish it before taking it. Entities outside any cluster get
/// a fresh position that is not cached.
pub fn advance_and_randomize<R: Rng>(
    entity: &mut ScrollEntity,
    speed: f64,
    cache: &mut RespawnCache,
    rng: &mut R,
) {
    entity.x += speed;
    if !has_exited(entity) {
        return;
    }

    let (x, y) = match entity.cluster_id {
        Some(id) => match cache.get(id) {
            Some(cached) if !entity.is_anchor => cached,
            _ => {
                let fresh = random_respawn_position(rng);
                cache.publish(id, fresh);
                tracing::trace!(cluster = id.0, x = fresh.0, y = fresh.1, "cluster respawn");
                fresh
            }
        },
        None => random_respawn_position(rng),
    };

    entity.x = x;
    entity.y = y;
}

/// Advance every cloud cluster in two phases.
///
/// Phase 1 moves the anchors so any regenerated position is published before
/// phase 2 moves the remaining members, which then read it from the cache.
/// Coherence no longer depends on member iteration order.
pub fn advance_clusters<R: Rng>(
    clusters: &mut [CloudCluster],
    speed: f64,
    cache: &mut RespawnCache,
    rng: &mut R,
) {
    for cluster in clusters.iter_mut() {
        for member in cluster.members.iter_mut().filter(|m| m.is_anchor) {
            advance_and_randomize(member, speed, cache, rng);
        }
    }

    for cluster in clusters.iter_mut() {
        for member in cluster.members.iter_mut().filter(|m| !m.is_anchor) {
            advance_and_randomize(member, speed, cache, rng);
        }
    }
}

impl ScrollField {
    /// One scroll tick over every pool in the scene.
    pub fn advance_all<R: Rng>(&mut self, rng: &mut R) {
        advance(&mut self.obstacle, self.tile_speed);
        for tile in self.ground.iter_mut().chain(self.river.iter_mut()) {
            advance(tile, self.tile_speed);
        }
        advance_clusters(
            &mut self.clouds,
            self.cloud_speed,
            &mut self.respawn_cache,
            rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{TILE_SPEED, VIEWPORT_HEIGHT};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn grass_at(x: f64) -> ScrollEntity {
        ScrollEntity::tile(x, 218.0, TileKind::Grass)
    }

    fn assert_in_respawn_window(position: (f64, f64)) {
        let (x, y) = position;
        assert!((RESPAWN_X..=RESPAWN_X + 500.0).contains(&x), "x = {x}");
        assert!((0.0..=VIEWPORT_HEIGHT / 2.0).contains(&y), "y = {y}");
    }

    // ── advance ──

    #[test]
    fn test_advance_moves_by_speed() {
        let mut tile = grass_at(100.0);
        advance(&mut tile, TILE_SPEED);
        assert!((tile.x - 98.0).abs() < f64::EPSILON);
        assert!((tile.y - 218.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_recycles_on_crossing() {
        let mut tile = grass_at(-23.0);
        advance(&mut tile, -2.0);
        assert!((tile.x - RESPAWN_X).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_no_recycle_above_boundary() {
        let mut tile = grass_at(-20.0);
        advance(&mut tile, -2.0);
        assert!((tile.x - (-22.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_exactly_on_boundary_is_not_recycled() {
        let mut tile = grass_at(-22.0);
        advance(&mut tile, -2.0);
        assert!((tile.x - (-24.0)).abs() < f64::EPSILON);

        advance(&mut tile, -2.0);
        assert!((tile.x - RESPAWN_X).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_recycles_on_exactly_one_tick() {
        let mut tile = grass_at(10.0);
        let mut recycled_on = None;
        for tick in 0..40 {
            let before = tile.x;
            advance(&mut tile, -2.0);
            if tile.x > before {
                assert!(recycled_on.is_none(), "recycled twice");
                assert!(before - 2.0 < RECYCLE_BOUNDARY);
                recycled_on = Some(tick);
            } else {
                assert!((before - tile.x - 2.0).abs() < 1e-9);
            }
        }
        // 10 -> -26 takes 18 ticks
        assert_eq!(recycled_on, Some(17));
    }

    // ── advance_and_randomize ──

    #[test]
    fn test_anchor_generates_and_publishes() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut cluster = CloudCluster::new(ClusterId(1), CloudSize::Small, -23.9, 40.0, 18.0);

        advance_and_randomize(&mut cluster.members[0], -0.2, &mut cache, &mut rng);

        let anchor = &cluster.members[0];
        let cached = cache.get(ClusterId(1)).expect("anchor should publish");
        assert_in_respawn_window(cached);
        assert!((anchor.x - cached.0).abs() < f64::EPSILON);
        assert!((anchor.y - cached.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_member_reuses_cached_position() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        cache.publish(ClusterId(9), (777.0, 12.5));
        let mut member = ScrollEntity {
            x: -24.0,
            y: 40.0,
            kind: TileKind::CloudCenter,
            cluster_id: Some(ClusterId(9)),
            is_anchor: false,
        };

        advance_and_randomize(&mut member, -0.2, &mut cache, &mut rng);

        assert!((member.x - 777.0).abs() < f64::EPSILON);
        assert!((member.y - 12.5).abs() < f64::EPSILON);
        assert_eq!(cache.get(ClusterId(9)), Some((777.0, 12.5)));
    }

    #[test]
    fn test_member_without_cache_falls_back_to_fresh_position() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut member = ScrollEntity {
            x: -24.0,
            y: 40.0,
            kind: TileKind::CloudRight,
            cluster_id: Some(ClusterId(4)),
            is_anchor: false,
        };

        advance_and_randomize(&mut member, -0.2, &mut cache, &mut rng);

        let cached = cache.get(ClusterId(4)).expect("fallback should publish");
        assert_in_respawn_window(cached);
        assert!((member.x - cached.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_anchor_ignores_stale_cache() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        cache.publish(ClusterId(2), (10_000.0, 999.0));
        let mut cluster = CloudCluster::new(ClusterId(2), CloudSize::Small, -24.0, 40.0, 18.0);

        advance_and_randomize(&mut cluster.members[0], -0.2, &mut cache, &mut rng);

        let cached = cache.get(ClusterId(2)).unwrap();
        assert_ne!(cached, (10_000.0, 999.0));
        assert_in_respawn_window(cached);
    }

    #[test]
    fn test_unclustered_entity_is_not_cached() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut tile = grass_at(-24.0);

        advance_and_randomize(&mut tile, -1.0, &mut cache, &mut rng);

        assert!(cache.is_empty());
        assert_in_respawn_window((tile.x, tile.y));
    }

    #[test]
    fn test_randomize_no_recycle_keeps_y() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut cluster = CloudCluster::new(ClusterId(1), CloudSize::Small, 50.0, 40.0, 18.0);

        advance_and_randomize(&mut cluster.members[0], -0.2, &mut cache, &mut rng);

        assert!((cluster.members[0].x - 49.8).abs() < 1e-9);
        assert!((cluster.members[0].y - 40.0).abs() < f64::EPSILON);
        assert!(cache.is_empty());
    }

    // ── advance_clusters ──

    #[test]
    fn test_two_phase_keeps_cluster_together_when_all_cross() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        // Every member sits just above the boundary so all recycle this tick.
        let mut clusters = vec![CloudCluster::new(
            ClusterId(1),
            CloudSize::Long,
            -23.9,
            40.0,
            0.0,
        )];

        advance_clusters(&mut clusters, -0.2, &mut cache, &mut rng);

        let (x0, y0) = cache.get(ClusterId(1)).unwrap();
        for member in &clusters[0].members {
            assert!((member.x - x0).abs() < f64::EPSILON);
            assert!((member.y - y0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_two_phase_is_independent_of_member_order() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut cluster = CloudCluster::new(ClusterId(5), CloudSize::Small, -23.9, 40.0, 0.0);
        // Put the anchor last; phase 1 must still process it first.
        cluster.members.reverse();
        let mut clusters = vec![cluster];

        advance_clusters(&mut clusters, -0.2, &mut cache, &mut rng);

        let published = cache.get(ClusterId(5)).unwrap();
        assert_eq!(cache.len(), 1);
        for member in &clusters[0].members {
            assert_eq!((member.x, member.y), published);
        }
    }

    #[test]
    fn test_clusters_get_independent_positions() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut clusters = vec![
            CloudCluster::new(ClusterId(1), CloudSize::Small, -23.9, 40.0, 0.0),
            CloudCluster::new(ClusterId(2), CloudSize::Medium, -23.9, 60.0, 0.0),
        ];

        advance_clusters(&mut clusters, -0.2, &mut cache, &mut rng);

        assert_eq!(cache.len(), 2);
        for cluster in &clusters {
            let cached = cache.get(cluster.id).unwrap();
            assert!(cluster
                .members
                .iter()
                .all(|m| (m.x, m.y) == cached));
        }
    }

    #[test]
    fn test_late_members_land_on_anchor_position() {
        let mut rng = test_rng();
        let mut cache = RespawnCache::new();
        let mut clusters = vec![CloudCluster::new(
            ClusterId(1),
            CloudSize::Small,
            -23.0,
            40.0,
            18.0,
        )];

        // The anchor crosses first; the members 18 and 36 px behind it cross
        // on later ticks and must land on whatever the anchor published.
        let mut landed: Vec<Option<((f64, f64), (f64, f64))>> = vec![None; 3];
        for _ in 0..400 {
            let before: Vec<f64> = clusters[0].members.iter().map(|m| m.x).collect();
            advance_clusters(&mut clusters, -0.2, &mut cache, &mut rng);
            for (i, member) in clusters[0].members.iter().enumerate() {
                if member.x > before[i] && landed[i].is_none() {
                    let cached = cache.get(ClusterId(1)).unwrap();
                    landed[i] = Some(((member.x, member.y), cached));
                }
            }
        }

        let anchor_position = landed[0].expect("anchor never recycled").0;
        for entry in &landed[1..] {
            let (position, cached) = entry.expect("member never recycled");
            assert_eq!(position, cached);
            assert_eq!(position, anchor_position);
        }
    }
}
