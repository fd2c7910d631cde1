use clap::Parser;
use log::info;
use rayon::prelude::*;

use photonmap::core::prelude::*;

use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct CommandOptions {
    /// Scene description (JSON).
    #[arg(value_name = "scene.json")]
    pub scene: PathBuf,

    /// Energy quantum per emitted photon; emission counts derive from
    /// radiated power divided by this.
    #[arg(short = 'q', long, default_value_t = 0.01)]
    pub quantum_energy: f32,

    /// Emission window in seconds.
    #[arg(long, default_value_t = 1.0)]
    pub duration: f32,

    /// Maximum surface interactions per photon path.
    #[arg(short = 'b', long, default_value_t = 8)]
    pub max_bounces: u32,

    /// Use the general BSDF rejection sampler at every bounce instead of
    /// each material's closed-form sampler.
    #[arg(long)]
    pub rejection: bool,

    /// Density-estimation query point.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [0.0, 0.0, 0.0])]
    pub query: Vec<f32>,

    /// Neighbours gathered by the density query.
    #[arg(short, long, default_value_t = 64)]
    pub k: usize,

    /// Initial gather radius.
    #[arg(short = 'r', long, default_value_t = 1.0)]
    pub gather_radius: f32,

    /// Base sequence of the per-worker sampler streams.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worker threads (0 = one per core).
    #[arg(short = 'j', long, default_value_t = 0)]
    pub nthreads: usize,
}

const PHOTON_BATCH: usize = 4096;

/// Trace one light's photon batch through the scene, returning the photons
/// stored at diffuse surfaces. Batches run in parallel; each owns its own
/// sampler stream, accumulator and output vector, so workers share nothing
/// mutable.
fn shoot_photons(
    scene: &Scene,
    light: &dyn Light,
    ids: &IdAllocator,
    opts: &CommandOptions,
    light_index: usize,
    progress: &ProgressReporter,
) -> Vec<Photon> {
    let n = light.photon_count(opts.quantum_energy, opts.duration);
    let energy = light.photon_energy(opts.quantum_energy, opts.duration);
    let n_batches = (n + PHOTON_BATCH - 1) / PHOTON_BATCH;

    return (0..n_batches)
        .into_par_iter()
        .map(|batch| {
            let stream = opts.seed ^ ((light_index as u64) << 40) ^ batch as u64;
            let mut rng = Rng::with_sequence(stream);
            let lo = batch * PHOTON_BATCH;
            let hi = usize::min(lo + PHOTON_BATCH, n);
            let mut stored = Vec::new();

            for _ in lo..hi {
                let mut photon = light.emit_photon(ids, &energy, &mut rng);
                while photon.scatter_count < opts.max_bounces && !photon.is_terminated() {
                    let ray = Ray::with_ids(
                        &photon.position(),
                        &photon.norm_dir,
                        photon.item_id(),
                        photon.scatter_count,
                    );
                    let mut isect = Intersection::new(&ray);
                    scene.intersect(&ray, &mut isect);
                    let item = match isect.item {
                        Some(item) => item,
                        None => break, // escaped the scene
                    };
                    let hit_p = ray.position(isect.distance);
                    let material = item.material();

                    if !material.diffuse_reflectance(&hit_p).is_black() {
                        let mut arrived = photon.clone();
                        arrived.set_position(&hit_p);
                        arrived.payload = Some(Box::new(PhotonPayload {
                            source_id: isect.hit_item_id(),
                            origin: photon.position(),
                            blur_radius: 0.0,
                        }));
                        stored.push(arrived);
                    }

                    photon = if opts.rejection {
                        material.scatter_photon(&photon, &isect.normal, &hit_p, &mut rng)
                    } else {
                        material.scatter_photon_direct(&photon, &isect.normal, &hit_p, &mut rng)
                    };
                }
            }
            progress.inc(1);
            return stored;
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            return a;
        });
}

fn run(opts: &CommandOptions) -> Result<(), PmError> {
    let ids = IdAllocator::new();
    let scene = SceneDesc::load(&opts.scene)?.build(&ids)?;
    if scene.lights.is_empty() {
        return Err(PmError::error("scene has no lights"));
    }
    info!(
        "scene: {} primitives, {} lights",
        scene.primitives.len(),
        scene.lights.len()
    );

    let mut total_batches = 0u64;
    for light in &scene.lights {
        let n = light.photon_count(opts.quantum_energy, opts.duration);
        total_batches += ((n + PHOTON_BATCH - 1) / PHOTON_BATCH) as u64;
    }

    let progress = ProgressReporter::new(total_batches, "Shooting photons");
    let mut stored: Vec<Photon> = Vec::new();
    for (light_index, light) in scene.lights.iter().enumerate() {
        let mut batch = shoot_photons(
            &scene,
            light.as_ref(),
            &ids,
            opts,
            light_index,
            &progress,
        );
        stored.append(&mut batch);
    }
    progress.done();
    info!("stored {} photons", stored.len());

    // Bounded k-nearest gather around the query point.
    let query = Point3f::new(opts.query[0], opts.query[1], opts.query[2]);
    let mut knn: KNearestItems<'_, Photon> = KNearestItems::new(
        &query,
        opts.gather_radius * opts.gather_radius,
        opts.k,
    );
    for photon in &stored {
        knn.insert(photon);
    }

    let gathered = knn.len();
    let radius_sq = if gathered == opts.k {
        knn.search_radius_sq()
    } else {
        opts.gather_radius * opts.gather_radius
    };
    let mut flux = Spectrum::zero();
    for (_, photon) in knn.items() {
        flux += photon.energy;
    }
    let irradiance = if radius_sq > 0.0 {
        flux / (PI * radius_sq)
    } else {
        Spectrum::zero()
    };

    println!("photons stored     : {}", stored.len());
    println!(
        "query point        : ({}, {}, {})",
        query.x, query.y, query.z
    );
    println!("photons gathered   : {} (k = {})", gathered, opts.k);
    println!("gather radius      : {}", radius_sq.sqrt());
    let e = irradiance.to_rgb();
    println!(
        "irradiance estimate: ({:.6}, {:.6}, {:.6})",
        e[0], e[1], e[2]
    );
    return Ok(());
}

fn main() {
    env_logger::init();
    let opts = CommandOptions::parse();

    if opts.nthreads > 0 {
        let result = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.nthreads)
            .build_global();
        if let Err(e) = result {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = run(&opts) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
