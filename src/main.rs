use std::env;
use std::error::Error;
use std::time::Instant;

use mesh_bvh::{Aabb, Bvh, BvhConfig, Mesh, Vertex};

const USAGE: &str = "usage: mesh-bvh <mesh.obj> [--leaf-size N] [--max-depth N]";

#[derive(Debug, PartialEq)]
struct Args {
    path: String,
    config: BvhConfig,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut path = None;
    let mut config = BvhConfig::default();
    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--leaf-size" => config.max_triangles_per_leaf = parse_value(arg, it.next())?,
            "--max-depth" => config.max_depth = parse_value(arg, it.next())?,
            _ if arg.starts_with("--") => return Err(format!("unknown option {arg}")),
            _ if path.is_none() => path = Some(arg.clone()),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }
    let path = path.ok_or_else(|| USAGE.to_string())?;
    Ok(Args { path, config })
}

fn parse_value(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{flag} expects a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} expects a non-negative integer, got {value}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let mesh = Mesh::load_obj_file(&args.path)?;
    let start = Instant::now();
    let mut bvh: Bvh<Vertex> = Bvh::with_config(args.config);
    bvh.build(&mesh.vertices, &mesh.indices)?;
    let stats = bvh.stats();
    let config = bvh.config();
    log::info!(
        "leaf size {}, depth limit {}",
        config.max_triangles_per_leaf,
        config.max_depth
    );
    println!(
        "{}: {} triangles, {} nodes, {} leaves, depth {}, built in {:?}",
        args.path,
        stats.triangles,
        stats.nodes,
        stats.leaves,
        stats.max_depth,
        start.elapsed()
    );

    if let Some(bounds) = bvh.bounds() {
        println!("bounds: {} .. {}", bounds.min(), bounds.max());

        // Probe the center of the mesh with a box a tenth of its size.
        let center = bounds.centroid();
        let half = bounds.extent() * 0.05;
        let mut hits = Vec::new();
        bvh.query_intersecting_triangles(&Aabb::new(center - half, center + half), &mut hits);
        println!("box query at center: {} candidates", hits.len());

        let radius = bounds.extent().max_element() * 0.05;
        bvh.query_nearby_triangles(center, radius, &mut hits);
        println!("sphere query at center (r = {radius}): {} candidates", hits.len());
    }

    let flat = bvh.flatten();
    println!(
        "flattened: {} nodes ({} bytes), {} triangle refs ({} bytes)",
        flat.nodes.len(),
        flat.node_bytes().len(),
        flat.triangles.len(),
        flat.triangle_bytes().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let parsed = parse_args(&args(&["mesh-bvh", "cube.obj"])).unwrap();
        assert_eq!(parsed.path, "cube.obj");
        assert_eq!(parsed.config, BvhConfig::default());
    }

    #[test]
    fn options() {
        let parsed = parse_args(&args(&[
            "mesh-bvh",
            "--leaf-size",
            "4",
            "cube.obj",
            "--max-depth",
            "12",
        ]))
        .unwrap();
        assert_eq!(parsed.config.max_triangles_per_leaf, 4);
        assert_eq!(parsed.config.max_depth, 12);
    }

    #[test]
    fn errors() {
        assert!(parse_args(&args(&["mesh-bvh"])).is_err());
        assert!(parse_args(&args(&["mesh-bvh", "a.obj", "b.obj"])).is_err());
        assert!(parse_args(&args(&["mesh-bvh", "a.obj", "--leaf-size"])).is_err());
        assert!(parse_args(&args(&["mesh-bvh", "a.obj", "--leaf-size", "x"])).is_err());
        assert!(parse_args(&args(&["mesh-bvh", "a.obj", "--verbose"])).is_err());
    }
}
