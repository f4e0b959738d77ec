use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub film_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: i32,
    pub original_language_id: Option<i32>,
    pub rental_duration: i32,
    #[sea_orm(column_type = "Decimal(Some((4, 2)))")]
    pub rental_rate: Decimal,
    pub length: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub replacement_cost: Decimal,
    pub rating: Option<Rating>,
    /// Comma separated, see [`Model::special_features`].
    pub special_features: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_category::Entity")]
    FilmCategory,
}

impl Related<super::film_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn special_features(&self) -> Vec<SpecialFeature> {
        self.special_features
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(SpecialFeature::parse)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum Rating {
    #[sea_orm(string_value = "G")]
    G,
    #[sea_orm(string_value = "PG")]
    Pg,
    #[sea_orm(string_value = "PG-13")]
    Pg13,
    #[sea_orm(string_value = "R")]
    R,
    #[sea_orm(string_value = "NC-17")]
    Nc17,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
            Rating::Nc17 => "NC-17",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecialFeature {
    Trailers,
    Commentaries,
    DeletedScenes,
    BehindTheScenes,
}

impl SpecialFeature {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Trailers" => Some(SpecialFeature::Trailers),
            "Commentaries" => Some(SpecialFeature::Commentaries),
            "Deleted Scenes" => Some(SpecialFeature::DeletedScenes),
            "Behind the Scenes" => Some(SpecialFeature::BehindTheScenes),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecialFeature::Trailers => "Trailers",
            SpecialFeature::Commentaries => "Commentaries",
            SpecialFeature::DeletedScenes => "Deleted Scenes",
            SpecialFeature::BehindTheScenes => "Behind the Scenes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(features: Option<&str>) -> Model {
        Model {
            film_id: 1,
            title: "ACADEMY DINOSAUR".to_string(),
            description: None,
            release_year: Some(2006),
            language_id: 1,
            original_language_id: None,
            rental_duration: 6,
            rental_rate: Decimal::new(99, 2),
            length: Some(86),
            replacement_cost: Decimal::new(2099, 2),
            rating: Some(Rating::Pg),
            special_features: features.map(str::to_string),
        }
    }

    #[test]
    fn special_features_decodes_known_items() {
        let f = film(Some("Deleted Scenes,Behind the Scenes"));
        assert_eq!(
            f.special_features(),
            vec![SpecialFeature::DeletedScenes, SpecialFeature::BehindTheScenes]
        );
    }

    #[test]
    fn special_features_skips_unknown_and_empty() {
        assert!(film(None).special_features().is_empty());
        assert_eq!(film(Some("Bloopers,Trailers,")).special_features(), vec![
            SpecialFeature::Trailers
        ]);
    }
}
