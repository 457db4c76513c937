use log::LevelFilter;
use tatami::util::log::init_simple_logger;
use tatami_homology::{ChainComplex, ChainReducer, ReduceError, rank_table};

// Reduce the simplicial chain complex of the boundary of the 3-simplex
// and print what survives.
fn main() -> Result<(), ReduceError> {
    init_simple_logger(LevelFilter::Info).unwrap();

    let d0 = vec![
        (1, 1, -1), (1, 2, 1),
        (2, 1, -1), (2, 3, 1),
        (3, 1, -1), (3, 4, 1),
        (4, 2, -1), (4, 3, 1),
        (5, 2, -1), (5, 4, 1),
        (6, 3, -1), (6, 4, 1),
    ];
    let d1 = vec![
        (1, 1, 1), (1, 2, -1), (1, 4, 1),
        (2, 1, 1), (2, 3, -1), (2, 5, 1),
        (3, 2, 1), (3, 3, -1), (3, 6, 1),
        (4, 4, 1), (4, 5, -1), (4, 6, 1),
    ];

    let ranks = vec![4, 6, 4];
    let c = ChainComplex::new(ranks.clone(), vec![d0, d1])?;
    let r = ChainReducer::reduce(c)?;

    println!("{r}");

    if r.is_free() {
        let ranks_d = vec![0; ranks.len() - 1];
        println!("{}", rank_table(&ranks, r.ranks(), &ranks_d));
    }

    Ok(())
}
