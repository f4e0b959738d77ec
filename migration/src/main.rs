use sea_orm_migration::prelude::*;

/// Schema the CLI operates on, chosen with `MIGRATOR` (default `catalog`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Target {
    Catalog,
    Analytics,
}

impl Target {
    fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("catalog") => Some(Target::Catalog),
            Some("analytics") => Some(Target::Analytics),
            Some(_) => None,
        }
    }
}

#[async_std::main]
async fn main() {
    let value = std::env::var("MIGRATOR").ok();
    match Target::parse(value.as_deref()) {
        Some(Target::Catalog) => cli::run_cli(migration::Migrator).await,
        Some(Target::Analytics) => cli::run_cli(migration::AnalyticsMigrator).await,
        None => {
            eprintln!("unknown MIGRATOR {value:?}, expected \"catalog\" or \"analytics\"");
            std::process::exit(2);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_the_default_target() {
        assert_eq!(Target::parse(None), Some(Target::Catalog));
        assert_eq!(Target::parse(Some("")), Some(Target::Catalog));
        assert_eq!(Target::parse(Some("catalog")), Some(Target::Catalog));
    }

    #[test]
    fn analytics_target_is_selectable() {
        assert_eq!(Target::parse(Some("analytics")), Some(Target::Analytics));
        assert_eq!(Target::parse(Some(" analytics ")), Some(Target::Analytics));
        assert_eq!(Target::parse(Some("mongo")), None);
    }
}
