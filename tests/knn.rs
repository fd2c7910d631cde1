use photonmap::core::prelude::*;

fn p_unif(rng: &mut Rng, range: Float) -> Float {
    return (rng.uniform_float() * 2.0 - 1.0) * range;
}

fn random_photons(ids: &IdAllocator, rng: &mut Rng, n: usize) -> Vec<Photon> {
    return (0..n)
        .map(|_| {
            let p = Point3f::new(p_unif(rng, 10.0), p_unif(rng, 10.0), p_unif(rng, 10.0));
            return Photon::new(ids, &p, &Vector3f::X, &Spectrum::one());
        })
        .collect();
}

// After any insertion sequence: at most k items, everything within the
// radius, and the root key equals the radius once the heap is full.
#[test]
fn heap_invariants_hold_under_random_insertions() {
    let ids = IdAllocator::new();
    let mut rng = Rng::with_sequence(4040);
    let query = Point3f::new(1.0, -2.0, 0.5);

    for round in 0..50 {
        let photons = random_photons(&ids, &mut rng, 200);
        let k = 1 + (round % 16);
        let mut knn: KNearestItems<'_, Photon> = KNearestItems::new(&query, 150.0, k);
        for p in &photons {
            knn.insert(p);

            assert!(knn.len() <= k);
            for (d_sq, item) in knn.items() {
                assert!(*d_sq <= knn.search_radius_sq());
                assert_eq!(*d_sq, item.bound().center.distance_squared(query));
            }
            if knn.len() == k {
                assert_eq!(knn.items()[0].0, knn.search_radius_sq());
            }
        }
    }
}

// The accumulator agrees with a naive sort over the full candidate set.
#[test]
fn matches_naive_k_nearest() {
    let ids = IdAllocator::new();
    let mut rng = Rng::with_sequence(6060);
    let query = Point3f::ZERO;
    let photons = random_photons(&ids, &mut rng, 500);

    for k in [1usize, 4, 16, 64] {
        let mut knn: KNearestItems<'_, Photon> = KNearestItems::new(&query, Float::INFINITY, k);
        for p in &photons {
            knn.insert(p);
        }

        let mut naive: Vec<Float> = photons
            .iter()
            .map(|p| p.position().distance_squared(query))
            .collect();
        naive.sort_by(|a, b| a.partial_cmp(b).unwrap());
        naive.truncate(k);

        let got: Vec<Float> = knn.into_sorted().iter().map(|e| e.0).collect();
        assert_eq!(got, naive, "k = {}", k);
    }
}

// A full heap ignores candidates farther than its root, and the ignored
// insertion changes nothing.
#[test]
fn far_candidates_leave_full_heap_unchanged() {
    let ids = IdAllocator::new();
    let mut rng = Rng::with_sequence(7070);
    let query = Point3f::ZERO;
    let photons = random_photons(&ids, &mut rng, 64);

    let mut knn: KNearestItems<'_, Photon> = KNearestItems::new(&query, Float::INFINITY, 8);
    for p in &photons {
        knn.insert(p);
    }
    let radius = knn.search_radius_sq();
    let kept: Vec<u64> = knn.items().iter().map(|e| e.1.item_id()).collect();

    let far = Photon::new(
        &ids,
        &Point3f::new(100.0, 100.0, 100.0),
        &Vector3f::X,
        &Spectrum::one(),
    );
    assert!(!knn.insert(&far));
    assert_eq!(knn.search_radius_sq(), radius);
    let after: Vec<u64> = knn.items().iter().map(|e| e.1.item_id()).collect();
    assert_eq!(kept, after);
}

// Radius tightening prunes: by the time the nearest cluster has been seen,
// distant photons no longer pass admission at all.
#[test]
fn radius_shrinks_monotonically() {
    let ids = IdAllocator::new();
    let query = Point3f::ZERO;

    // Ring of photons at increasing distances along +x.
    let photons: Vec<Photon> = (1..=32)
        .map(|i| {
            let p = Point3f::new(i as Float, 0.0, 0.0);
            return Photon::new(&ids, &p, &Vector3f::X, &Spectrum::one());
        })
        .collect();

    let mut knn: KNearestItems<'_, Photon> = KNearestItems::new(&query, Float::INFINITY, 8);
    let mut last = Float::INFINITY;
    for p in &photons {
        knn.insert(p);
        assert!(knn.search_radius_sq() <= last);
        last = knn.search_radius_sq();
    }
    assert_eq!(knn.search_radius_sq(), 64.0);
    assert_eq!(knn.len(), 8);
}
