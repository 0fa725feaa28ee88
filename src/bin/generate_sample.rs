use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick from weighted options.
    fn pick<'a, T>(&mut self, options: &'a [(T, f64)]) -> &'a T {
        let total: f64 = options.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for (value, weight) in options {
            if roll < *weight {
                return value;
            }
            roll -= weight;
        }
        &options[options.len() - 1].0
    }
}

const ROWS: usize = 2000;

// (role, sampling weight)
const ROLES: &[(&str, f64)] = &[
    ("Data Scientist", 3.0),
    ("Data Engineer", 2.5),
    ("Data Analyst", 2.5),
    ("Machine Learning Engineer", 1.5),
    ("Analytics Engineer", 0.6),
    ("Research Scientist", 0.5),
    ("Data Architect", 0.4),
    ("BI Developer", 0.4),
    ("Applied Scientist", 0.3),
    ("Head of Data", 0.2),
    ("Data Manager", 0.3),
    ("ML Ops Engineer", 0.2),
];

fn role_base(role: &str) -> f64 {
    match role {
        "Head of Data" => 190_000.0,
        "Applied Scientist" | "Research Scientist" => 165_000.0,
        "Machine Learning Engineer" | "Data Architect" => 155_000.0,
        "Data Scientist" | "ML Ops Engineer" => 140_000.0,
        "Data Engineer" | "Analytics Engineer" => 135_000.0,
        "Data Manager" => 120_000.0,
        _ => 95_000.0,
    }
}

// (iso3, salary multiplier) with sampling weights
const COUNTRIES: &[((&str, f64), f64)] = &[
    (("USA", 1.0), 8.0),
    (("GBR", 0.65), 1.0),
    (("CAN", 0.75), 1.0),
    (("DEU", 0.6), 0.6),
    (("ESP", 0.45), 0.5),
    (("IND", 0.2), 0.5),
    (("FRA", 0.55), 0.4),
    (("BRA", 0.3), 0.4),
    (("PRT", 0.4), 0.3),
    (("AUS", 0.8), 0.3),
    (("NLD", 0.6), 0.2),
    (("CHE", 0.9), 0.1),
];

const SENIORITY: &[((&str, f64), f64)] = &[
    (("Junior", 0.6), 1.0),
    (("Pleno", 0.85), 2.0),
    (("Senior", 1.1), 5.0),
    (("Executivo", 1.4), 0.4),
];

const CONTRACTS: &[(&str, f64)] = &[
    ("Integral", 9.0),
    ("Contrato", 0.3),
    ("Parcial", 0.3),
    ("Freelancer", 0.2),
];

const COMPANY_SIZES: &[(&str, f64)] = &[("Pequena", 0.5), ("Media", 8.0), ("Grande", 1.5)];

const REMOTE: &[(&str, f64)] = &[("Presencial", 5.5), ("Remoto", 4.0), ("Hibrido", 0.5)];

const YEARS: &[(i64, f64)] = &[(2020, 0.3), (2021, 0.7), (2022, 2.0), (2023, 4.0), (2024, 5.0), (2025, 1.0)];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut years = Vec::with_capacity(ROWS);
    let mut seniority = Vec::with_capacity(ROWS);
    let mut contracts = Vec::with_capacity(ROWS);
    let mut sizes = Vec::with_capacity(ROWS);
    let mut roles = Vec::with_capacity(ROWS);
    let mut salaries = Vec::with_capacity(ROWS);
    let mut remote = Vec::with_capacity(ROWS);
    let mut countries = Vec::with_capacity(ROWS);

    for _ in 0..ROWS {
        let year = *rng.pick(YEARS);
        let (level, level_factor) = *rng.pick(SENIORITY);
        let role = *rng.pick(ROLES);
        let (country, country_factor) = *rng.pick(COUNTRIES);
        let growth = 1.0 + 0.04 * (year - 2020) as f64;

        let base = role_base(role) * level_factor * country_factor * growth;
        let salary = rng.gauss(base, base * 0.2).max(5_000.0).round();

        years.push(year);
        seniority.push(level);
        contracts.push(*rng.pick(CONTRACTS));
        sizes.push(*rng.pick(COMPANY_SIZES));
        roles.push(role);
        salaries.push(salary);
        remote.push(*rng.pick(REMOTE));
        countries.push(country);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("porte_empresa", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("usd", DataType::Float64, false),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(years)),
            Arc::new(StringArray::from(seniority)),
            Arc::new(StringArray::from(contracts)),
            Arc::new(StringArray::from(sizes)),
            Arc::new(StringArray::from(roles)),
            Arc::new(Float64Array::from(salaries)),
            Arc::new(StringArray::from(remote)),
            Arc::new(StringArray::from(countries)),
        ],
    )
    .context("building record batch")?;

    // Write Parquet
    let parquet_path = "salaries.parquet";
    let file = std::fs::File::create(parquet_path).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;

    // Write CSV with the same columns
    let csv_path = "salaries.csv";
    let file = std::fs::File::create(csv_path).context("creating CSV output")?;
    let mut writer = arrow::csv::Writer::new(file);
    writer.write(&batch).context("writing CSV")?;

    print_batches(&[batch.slice(0, 5)]).context("printing preview")?;
    println!("Wrote {ROWS} salary records to {parquet_path} and {csv_path}");
    Ok(())
}
