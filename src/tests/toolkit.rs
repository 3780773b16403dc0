use crate::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/*
 * Builds an access flag column, None being missing
 */
pub fn access_column(name: &str, flags: &[Option<bool>]) -> Column {
    Column::new(
        name,
        flags
            .iter()
            .map(|flag| match flag {
                Some(b) => Cell::Bool(*b),
                None => Cell::Missing,
            })
            .collect(),
    )
}

/*
 * Builds a time column 0..n
 */
pub fn time_column(nb_rows: usize) -> Column {
    Column::from_values(
        "Time",
        &(0..nb_rows).map(|t| t as f64).collect::<Vec<_>>(),
    )
}

/*
 * Panics if a satellite column remains for a satellite
 * that is not part of the qualified set
 */
pub fn assert_pruned(table: &TelemetryTable, qualified: &[SatelliteId]) {
    for name in table.column_names() {
        if let Some(token) = satellite_prefix(name) {
            assert!(
                token.id().map(|sat| qualified.contains(&sat)).unwrap_or(false),
                "{} remains but {} did not qualify",
                name,
                token
            );
        }
    }
}

/// Randomized connectivity fixture
pub struct RandomFixture {
    pub table: TelemetryTable,
    /// Expected qualified satellites
    pub qualified: Vec<SatelliteId>,
}

/*
 * Generates a random telemetry table. Each (satellite, station) access
 * column is either absent, never raised, or raised at random rows.
 * Every satellite carries a name, and SNR columns.
 */
pub fn random_fixture(seed: u64, nb_satellites: u32, nb_rows: usize) -> RandomFixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut columns = vec![time_column(nb_rows)];
    let mut qualified = Vec::new();

    for index in 0..nb_satellites {
        let satellite = SatelliteId::new(index);
        columns.push(Column::new(
            &satellite.descriptor_column("Name"),
            vec![Cell::Text(format!("SAT-{}", index)); nb_rows],
        ));

        let mut reached = 0;
        for station in Station::MONITORED {
            let mode = rng.gen_range(0..3);
            if mode > 0 {
                let mut flags = (0..nb_rows)
                    .map(|_| match rng.gen_range(0..3) {
                        0 => None,
                        1 => Some(false),
                        _ => Some(mode == 2),
                    })
                    .collect::<Vec<_>>();
                if mode == 2 {
                    // guarantee one event
                    let row = rng.gen_range(0..nb_rows);
                    flags[row] = Some(true);
                    reached += 1;
                }
                columns.push(access_column(
                    &satellite.column(&station, &Metric::Access),
                    &flags,
                ));
            }
            columns.push(Column::from_values(
                &satellite.column(&station, &Metric::SnrDb),
                &(0..nb_rows)
                    .map(|_| rng.gen_range(1.0..20.0))
                    .collect::<Vec<_>>(),
            ));
        }
        if reached == Station::MONITORED.len() {
            qualified.push(satellite);
        }
    }

    RandomFixture {
        table: TelemetryTable::from_columns(columns).unwrap(),
        qualified,
    }
}
