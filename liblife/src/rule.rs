use anyhow::{Context, bail};

/// Birth/survival neighbor-count thresholds, e.g. B3/S23 for Conway's Life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub born: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            born: vec![3],
            survive: vec![2, 3],
        }
    }
}

impl Rule {
    /// Parses a `B<digits>/S<digits>` specifier. The two halves may appear in
    /// either order and repeated digits collapse to set membership.
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let (left, right) = spec
            .split_once('/')
            .with_context(|| format!("Rule specifier {spec:?} is missing the '/' separator"))?;

        let mut born = None;
        let mut survive = None;

        for part in [left, right] {
            let part = part.trim();

            match part.chars().next() {
                Some('B' | 'b') => born = Some(parse_counts(&part[1..])?),
                Some('S' | 's') => survive = Some(parse_counts(&part[1..])?),
                _ => bail!("Rule part {part:?} must start with 'B' or 'S'"),
            }
        }

        Ok(Self {
            born: born.with_context(|| format!("Rule specifier {spec:?} has no birth part"))?,
            survive: survive
                .with_context(|| format!("Rule specifier {spec:?} has no survival part"))?,
        })
    }

    pub fn is_born(&self, live_neighbors: usize) -> bool {
        self.born.contains(&live_neighbors)
    }

    pub fn survives(&self, live_neighbors: usize) -> bool {
        self.survive.contains(&live_neighbors)
    }
}

fn parse_counts(digits: &str) -> anyhow::Result<Vec<usize>> {
    let mut counts = Vec::new();

    for ch in digits.chars() {
        let count = ch
            .to_digit(10)
            .with_context(|| format!("Non-digit {ch:?} in rule specifier"))?
            as usize;

        if count > 8 {
            bail!("Neighbor count {count} is outside the Moore range 0..=8");
        }

        if !counts.contains(&count) {
            counts.push(count);
        }
    }

    Ok(counts)
}
