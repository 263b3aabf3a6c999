use clap::Parser;
use flowql::graph::{Edge, FlowGraph, Node};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random pipeline graphs for the flowql CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Number of event source nodes
    #[arg(long, default_value_t = 6)]
    events: usize,

    /// Number of JOIN / UNION ALL nodes
    #[arg(long, default_value_t = 4)]
    combinators: usize,

    /// Seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,
}

const FIELD_POOL: &[&str] = &["uid", "ds", "level", "channel", "amount", "device", "region"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.events < 2 && cli.combinators > 0 {
        eprintln!("Error: combinators need at least 2 event sources");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating graph ({} events, {} combinators)...",
        cli.events, cli.combinators
    );
    let graph = generate_graph(&mut rng, cli.events, cli.combinators)?;

    let json_output = graph.to_wire()?.to_json_pretty()?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} nodes and {} edges into '{}'",
        graph.nodes().len(),
        graph.edges().len(),
        cli.output
    );
    Ok(())
}

fn generate_graph(
    rng: &mut StdRng,
    events: usize,
    combinators: usize,
) -> Result<FlowGraph, Box<dyn std::error::Error>> {
    let mut graph = FlowGraph::new();
    let mut producers: Vec<String> = Vec::new();

    for i in 0..events {
        let id = format!("event_{}", i);
        let mut fields: Vec<&str> = FIELD_POOL.to_vec();
        fields.shuffle(rng);
        fields.truncate(rng.random_range(2..=FIELD_POOL.len()));
        let x = 0.0;
        let y = i as f64 * 120.0;
        graph.add_node(Node::event(&id, format!("evt_{}", i), &fields).at(x, y))?;
        producers.push(id);
    }

    for i in 0..combinators {
        let is_join = rng.random_bool(0.5);
        let id = format!("{}_{}", if is_join { "join" } else { "union" }, i);
        let node = if is_join {
            Node::join(&id)
        } else {
            Node::union_all(&id)
        };
        graph.add_node(node.at(300.0 * (i + 1) as f64, 60.0 * i as f64))?;

        let inputs = if is_join { 2 } else { rng.random_range(2..=3) };
        let mut candidates = producers.clone();
        candidates.shuffle(rng);
        for source in candidates.iter().take(inputs) {
            graph.add_edge(Edge::between(source, &id))?;
        }
        producers.push(id);
    }

    if let Some(last) = producers.last().cloned() {
        let x = 300.0 * (combinators + 1) as f64;
        graph.add_node(Node::output("output").at(x, 0.0))?;
        graph.add_edge(Edge::between(last, "output"))?;
    }
    println!("-> Generated {} nodes.", graph.nodes().len());
    Ok(graph)
}
