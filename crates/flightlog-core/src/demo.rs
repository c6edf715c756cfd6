//! Built-in demo catalog: two drones, three section templates and two
//! report templates.

use tracing::info;

use crate::error::Result;
use crate::model::{
    Camera, Dimensions, DroneProfile, DroneSpecifications, Item, ItemKind, ReportTemplate,
    SectionTemplate,
};
use crate::storage::ReportStore;

fn check(content: &str) -> Item {
    Item::checkbox(content)
}

fn checklist(items: &[&str]) -> Vec<Item> {
    items.iter().map(|content| check(content)).collect()
}

pub fn drone_profiles() -> Vec<DroneProfile> {
    vec![
        DroneProfile {
            id: "drone-1".to_string(),
            name: "miniSIGMA".to_string(),
            model: "miniSIGMA-1".to_string(),
            specifications: DroneSpecifications {
                max_flight_time: 60.0,
                max_speed: 80.0,
                max_altitude: 5000.0,
                max_range: 50.0,
                weight: 2500.0,
                dimensions: Dimensions {
                    length: 120.0,
                    width: 180.0,
                    height: 30.0,
                },
                camera: Some(Camera {
                    model: "HD Camera 1080p".to_string(),
                    resolution: "1920x1080".to_string(),
                }),
                battery_type: "Li-Po 10000mAh".to_string(),
            },
        },
        DroneProfile {
            id: "drone-2".to_string(),
            name: "Orlan".to_string(),
            model: "Orlan-10".to_string(),
            specifications: DroneSpecifications {
                max_flight_time: 120.0,
                max_speed: 150.0,
                max_altitude: 6000.0,
                max_range: 120.0,
                weight: 5500.0,
                dimensions: Dimensions {
                    length: 180.0,
                    width: 320.0,
                    height: 40.0,
                },
                camera: Some(Camera {
                    model: "Thermal Imaging Camera".to_string(),
                    resolution: "3840x2160".to_string(),
                }),
                battery_type: "Li-Po 22000mAh".to_string(),
            },
        },
    ]
}

pub fn section_templates() -> Vec<SectionTemplate> {
    vec![
        SectionTemplate {
            id: "section-1".to_string(),
            title: "Preparation (at base, before flights)".to_string(),
            items: vec![
                check("Charge batteries:").with_children(checklist(&[
                    "Flight packs x2",
                    "Remote controller battery",
                    "Ground station battery",
                ])),
                check("Load terrain base maps onto the ground station"),
                check("Load the elevation map onto the ground station"),
                check("Prepare the route"),
                check("Collect equipment per the packing list"),
            ],
        },
        SectionTemplate {
            id: "section-2".to_string(),
            title: "Preparation (on site)".to_string(),
            items: vec![
                check("Assess the weather, postpone the flight if:").with_children(checklist(&[
                    "steady wind above 10 m/s",
                    "gusts above 15 m/s",
                    "crosswind relative to the take-off line",
                    "visibility does not allow imaging",
                    "precipitation",
                    "weather trending worse",
                ])),
                check("Assemble the aircraft"),
                check("Install the battery"),
                check("Fit the propeller and check its tightening"),
            ],
        },
        SectionTemplate {
            id: "section-3".to_string(),
            title: "Post-flight".to_string(),
            items: vec![
                Item::new("Flight time, min", ItemKind::Number),
                Item::new("Landing quality", ItemKind::Select)
                    .with_options(["nominal", "hard", "off-target"]),
                Item::new("Remarks", ItemKind::Text),
                check("Download imagery and telemetry logs"),
            ],
        },
    ]
}

pub fn report_templates() -> Vec<ReportTemplate> {
    let sections = section_templates();
    vec![
        ReportTemplate {
            id: "report-template-1".to_string(),
            name: "Standard checklist for miniSIGMA".to_string(),
            sections: sections[..2].to_vec(),
            drone_types: vec!["miniSIGMA-1".to_string()],
        },
        ReportTemplate {
            id: "report-template-2".to_string(),
            name: "Full checklist for all drones".to_string(),
            sections,
            drone_types: vec!["miniSIGMA-1".to_string(), "Orlan-10".to_string()],
        },
    ]
}

/// Insert the demo catalog when no templates exist yet.
///
/// Returns whether anything was written.
pub fn seed_demo_data<S: ReportStore + ?Sized>(store: &mut S) -> Result<bool> {
    if !store.is_empty_catalog()? {
        return Ok(false);
    }

    for drone in drone_profiles() {
        store.save_drone(&drone)?;
    }
    for template in section_templates() {
        store.save_section_template(&template)?;
    }
    for template in report_templates() {
        store.save_report_template(&template)?;
    }

    info!("Seeded demo drones and templates");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use crate::tree::{collect_ids, count_items};

    #[test]
    fn test_demo_templates_reference_known_drones() {
        let models: Vec<String> = drone_profiles().into_iter().map(|d| d.model).collect();
        for template in report_templates() {
            for model in &template.drone_types {
                assert!(models.contains(model), "unknown model {}", model);
            }
        }
    }

    #[test]
    fn test_demo_items_have_unique_ids() {
        let sections = section_templates();
        let total: usize = sections.iter().map(|s| count_items(&s.items)).sum();
        let mut ids: Vec<&str> = sections.iter().flat_map(|s| collect_ids(&s.items)).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_seed_only_once() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(seed_demo_data(&mut store).unwrap());
        assert!(!seed_demo_data(&mut store).unwrap());

        assert_eq!(store.list_drones().unwrap().len(), 2);
        assert_eq!(store.list_section_templates().unwrap().len(), 3);
        assert_eq!(store.list_report_templates().unwrap().len(), 2);
    }
}
