//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZeError};
use crate::operator::ZeOperator;
use crate::record::ZeItemBatch;

/// A fixed description for one item id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeAssignment {
    pub id: String,
    pub description: String,
}

impl ZeAssignment {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
struct _DescriptionsAssign {
    assignments: HashMap<String, String>,
}

impl ZeOperator for _DescriptionsAssign {
    fn name(&self) -> &'static str {
        "descriptions.assign"
    }

    fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        let mut seen = HashSet::new();
        for item in &mut batch {
            if let Some(description) = self.assignments.get(&item.id) {
                item.description = description.clone();
                seen.insert(item.id.clone());
            }
        }
        let mut missing = self
            .assignments
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .collect::<Vec<_>>();
        missing.sort();
        for id in missing {
            log::warn!("descriptions.assign: no item with id '{id}'");
        }
        Ok(batch)
    }
}

/// Builds `descriptions.assign` from `{"assignments": [{"id", "description"}]}`.
/// Ids must be unique and descriptions non-empty.
pub fn descriptions_assign_factory(config: &Value) -> Result<Box<dyn ZeOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ZeError::validation("descriptions.assign config must be object"))?;
    let list = obj
        .get("assignments")
        .ok_or_else(|| ZeError::validation("descriptions.assign requires array 'assignments'"))?;
    let list: Vec<ZeAssignment> = serde_json::from_value(list.clone()).map_err(|err| {
        ZeError::validation(format!("descriptions.assign 'assignments' invalid: {err}"))
    })?;

    let mut assignments = HashMap::with_capacity(list.len());
    for entry in list {
        let id = entry.id.trim().to_string();
        let description = entry.description.trim().to_string();
        if id.is_empty() || description.is_empty() {
            return Err(ZeError::validation(
                "descriptions.assign entries need a non-empty id and description",
            ));
        }
        if assignments.insert(id.clone(), description).is_some() {
            return Err(ZeError::validation(format!(
                "descriptions.assign lists id '{id}' twice"
            )));
        }
    }
    Ok(Box::new(_DescriptionsAssign { assignments }))
}

/// The sixteen regional descriptions of the `assign-descriptions` preset.
pub fn regional_descriptions() -> Vec<ZeAssignment> {
    [
        ("napolitana", "Fresh sardines, garlic, and parsley on a bed of tomato sauce, inspired by Jaffa's port."),
        ("pep_msh_pep", "A mix of spicy beef sausage, mushrooms, and peppers, reminiscent of Ramallah's bustling markets."),
        ("the_greek", "Kalamata olives, feta cheese, and oregano, celebrating the olive harvest season."),
        ("brie_carre", "Creamy Nablus cheese paired with sweet pears and a drizzle of honey."),
        ("calabrese", "Spicy beef salami with chili flakes and roasted red peppers, inspired by Akka's bold flavors."),
        ("ital_supr", "A grand assortment of beef pepperoni, sausage, mushrooms, onions, and peppers."),
        ("peppr_salami", "Three types of cured beef salami, seasoned with Jerusalem's spice blends."),
        ("prsc_argla", "Fresh arugula and cured beef strips on a white base, drizzled with olive oil."),
        ("sicilian", "Thick-crust square pizza with spicy tomato sauce, herbs, and olives."),
        ("soppressata", "Cured beef sausage with black pepper and garlic, a Hebron favorite."),
        ("spicy_ital", "Spicy beef sausage and hot peppers, bringing the heat of Ramallah's summers."),
        ("five_cheese", "A rich blend of Akawi, Nablus, Halloumi, Mozzarella, and Kashkaval cheeses."),
        ("four_cheese", "A creamy mix of local cheeses, topped with sesame seeds."),
        ("mexicana", "Spiced ground beef, corn, and peppers, seasoned with a Bedouin spice mix."),
        ("spin_pesto", "Green olive pesto base topped with sun-dried tomatoes and feta."),
        ("veggie_veg", "A colorful array of roasted zucchini, eggplant, peppers, and onions."),
    ]
    .iter()
    .map(|(id, description)| ZeAssignment::new(*id, *description))
    .collect()
}
