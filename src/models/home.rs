use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::schema::homes;

/// Number of predictive features a model receives.
pub const FEATURE_COUNT: usize = 7;

/// Feature names in the order the model expects them.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] =
    ["rm", "lstat", "dis", "tax", "ptratio", "age", "indus"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeFeatures {
    pub rm: f64,
    pub lstat: f64,
    pub dis: f64,
    pub tax: f64,
    pub ptratio: f64,
    pub age: f64,
    pub indus: f64,
}

impl HomeFeatures {
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.rm,
            self.lstat,
            self.dis,
            self.tax,
            self.ptratio,
            self.age,
            self.indus,
        ]
    }
}

/// A home as submitted by clients or read from the dataset, `medv` included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Insertable)]
#[diesel(table_name = homes)]
pub struct NewHome {
    pub rm: f64,
    pub lstat: f64,
    pub dis: f64,
    pub tax: f64,
    pub ptratio: f64,
    pub age: f64,
    pub indus: f64,
    pub medv: f64,
}

impl NewHome {
    pub fn features(&self) -> HomeFeatures {
        HomeFeatures {
            rm: self.rm,
            lstat: self.lstat,
            dis: self.dis,
            tax: self.tax,
            ptratio: self.ptratio,
            age: self.age,
            indus: self.indus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = homes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Home {
    pub id: i32,
    pub rm: f64,
    pub lstat: f64,
    pub dis: f64,
    pub tax: f64,
    pub ptratio: f64,
    pub age: f64,
    pub indus: f64,
    pub medv: f64,
}

impl Home {
    /// The stored fields without the id.
    pub fn record(&self) -> NewHome {
        NewHome {
            rm: self.rm,
            lstat: self.lstat,
            dis: self.dis,
            tax: self.tax,
            ptratio: self.ptratio,
            age: self.age,
            indus: self.indus,
            medv: self.medv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_price_dh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_follows_model_order() {
        let features = HomeFeatures {
            rm: 1.0,
            lstat: 2.0,
            dis: 3.0,
            tax: 4.0,
            ptratio: 5.0,
            age: 6.0,
            indus: 7.0,
        };
        assert_eq!(
            features.feature_vector(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn features_ignore_medv_when_deserializing() {
        let json = r#"{"rm":6.0,"lstat":5.0,"dis":4.0,"tax":300,"ptratio":15,"age":60,"indus":7,"medv":24.0}"#;
        let features: HomeFeatures = serde_json::from_str(json).unwrap();
        assert_eq!(features.tax, 300.0);
    }

    #[test]
    fn new_home_requires_medv() {
        let json = r#"{"rm":6.0,"lstat":5.0,"dis":4.0,"tax":300,"ptratio":15,"age":60,"indus":7}"#;
        assert!(serde_json::from_str::<NewHome>(json).is_err());
    }
}
