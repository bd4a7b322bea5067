/*!
## Trud (Truss Decomposition)

A command-line utility for computing the trussness of every edge in an
undirected graph. The result is printed as one `source,target,trussness`
row per edge.

### License

MIT
*/
use truss_decomposition::{graph, trussness};

use std::time::Instant;

use eyre::Result;

fn main() -> Result<()> {
    let args = cli::main()?;

    let total = Instant::now();

    println!("------");
    let graph = measure("Load graph", || graph::parse(&args.graph))?;
    println!("------");

    println!("Graph Meta Information:\n{}", graph);
    println!("------");

    let trussness = measure("Compute trussness", || trussness(&graph))?;
    println!("------");

    println!("fromNode,toNode,truss");
    for (edge, trussness) in trussness.iter().enumerate() {
        let (from, to) = graph.edge_endpoints(edge);
        println!("{},{},{}", from, to, trussness);
    }

    println!("Total runtime = {:?}", total.elapsed());

    Ok(())
}

fn measure<R>(desc: &str, func: impl FnOnce() -> R) -> R {
    println!("Start :: {}", desc);
    let start = Instant::now();
    let result = func();
    println!("Finish :: {} took {:?}", desc, start.elapsed());
    result
}

mod cli {
    use pico_args::Arguments;
    use std::{ffi::OsStr, path::PathBuf};

    use crate::Result;

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) graph: std::path::PathBuf,
    }

    pub(crate) fn main() -> Result<AppArgs> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf> {
            Ok(arg.into())
        }

        let args = AppArgs {
            graph: pargs.value_from_os_str(["-g", "--graph"], as_path_buf)?,
        };

        Ok(args)
    }
}
