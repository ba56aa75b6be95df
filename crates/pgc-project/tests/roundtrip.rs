use pgc_project::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pgc_project_{}_{}", std::process::id(), name))
}

#[test]
fn roundtrip_yaml_reference() {
    let plant = PlantFile::reference("Reference Plant");
    let path = temp_path("reference.yaml");

    save_yaml(&path, &plant).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(plant, loaded);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn roundtrip_json_dry_cooler() {
    let mut plant = PlantFile::reference("Dry Cooled");
    plant.rejection = RejectionDef::default_dry_cooler();
    plant.teg.module = "thermonamic".to_string();
    plant.simulation.integrator = IntegratorDef::ForwardEuler;
    let path = temp_path("dry.json");

    save_plant(&path, &plant).unwrap();
    let loaded = load_plant(&path).unwrap();

    assert_eq!(plant, loaded);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn sparse_yaml_fills_reference_defaults() {
    let yaml = r#"
version: 1
name: Wellpad
burner:
  fuel_mcf_per_day: 25.0
rejection:
  type: GroundLoop
  borehole_count: 30
"#;
    let plant: PlantFile = serde_yaml::from_str(yaml).unwrap();
    validate_plant_file(&plant).unwrap();

    assert_eq!(plant.burner.fuel_mcf_per_day, 25.0);
    assert_eq!(plant.burner.efficiency, 0.88);
    assert_eq!(plant.teg, TegDef::default());
    assert_eq!(plant.simulation, SimulationDef::default());
    match plant.rejection {
        RejectionDef::GroundLoop {
            borehole_count,
            depth_m,
            recharge_w_per_k,
            ..
        } => {
            assert_eq!(borehole_count, 30);
            assert_eq!(depth_m, 150.0);
            assert!(recharge_w_per_k.is_none());
        }
        RejectionDef::DryCooler { .. } => panic!("expected ground loop"),
    }
}

#[test]
fn invalid_file_fails_to_load() {
    let path = temp_path("invalid.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: bad\nteg:\n  module: marlow\n  count: 0\n",
    )
    .unwrap();

    assert!(matches!(load_yaml(&path), Err(ProjectError::Validation(_))));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_refuses_invalid_plant() {
    let mut plant = PlantFile::reference("bad");
    plant.hot_loop.mass_flow_kg_s = -1.0;
    let path = temp_path("refused.yaml");
    assert!(save_yaml(&path, &plant).is_err());
    assert!(!path.exists());
}
