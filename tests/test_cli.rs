#[test]
fn ejemplo_1_base() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1base.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("EP(step A+B), ren =    50.0, nren=   200.0, tot =   250.0, RER =    0.20")
        .unwrap();
}

#[test]
fn ejemplo_1_pv() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1PV.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("EP(step A+B), ren =    75.0, nren=   100.0, tot =   175.0, RER =    0.43")
        .unwrap();
}

#[test]
fn ejemplo_1_xpv() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1xPV.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("EP(step A)  , ren =   100.0, nren=     0.0, tot =   100.0, RER =    1.00")
        .stdout()
        .contains("EP(step A+B), ren =   120.0, nren=   -80.0, tot =    40.0, RER =    3.00")
        .unwrap();
}

#[test]
fn ejemplo_1_xpv_kexp_0() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1xPV.csv",
            "-f",
            "test_data/factores_paso_test.csv",
            "--kexp",
            "0",
        ])
        .stdout()
        .contains("Factor de exportación (usuario) [-]: 0.00")
        .stdout()
        .contains("EP(step A+B), ren =   100.0, nren=     0.0, tot =   100.0, RER =    1.00")
        .unwrap();
}

#[test]
fn ejemplo_1_xpv_metadatos() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1xPVmeta.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("Factor de exportación (metadatos) [-]: 0.00")
        .stdout()
        .contains("Área de referencia (metadatos) [m2]: 2.00")
        .stdout()
        .contains("EP(step A+B), ren =    50.0, nren=     0.0, tot =    50.0, RER =    1.00")
        .unwrap();
}

#[test]
fn ejemplo_2_xpv_gas() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo2xPVgas.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("EP(step A)  , ren =    20.0, nren=   209.0, tot =   229.0, RER =    0.09")
        .stdout()
        .contains("EP(step A+B), ren =    30.0, nren=   169.0, tot =   199.0, RER =    0.15")
        .unwrap();
}

#[test]
fn ejemplo_4_cgn_fosil() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo4cgnfosil.csv",
            "-f",
            "test_data/factores_paso_test.csv",
        ])
        .stdout()
        .contains("EP(step A+B), ren =   -14.0, nren=   227.8, tot =   213.8, RER =   -0.07")
        .unwrap();
}

#[test]
fn ejemplo_6_k3_area() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo6K3.csv",
            "-f",
            "test_data/factores_paso_test.csv",
            "-A",
            "10",
        ])
        .stdout()
        .contains("Área de referencia (usuario) [m2]: 10.00")
        .stdout()
        .contains("EP(step A)  , ren =   122.0, nren=     0.0, tot =   122.0, RER =    1.00")
        .stdout()
        .contains("nren=   -66.2")
        .unwrap();
}

#[test]
fn ejemplo_6_k3_krdel_0() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo6K3.csv",
            "-f",
            "test_data/factores_paso_test.csv",
            "--krdel",
            "0",
        ])
        .stdout()
        .contains("Factor de redistribución (usuario) [-]: 0.00")
        .stdout()
        .contains("EP(step A)  , ren =  1009.5, nren=   842.0, tot =  1851.5, RER =    0.55")
        .unwrap();
}

#[test]
fn factores_predefinidos() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo1base.csv"])
        .stdout()
        .contains("Factores de paso (predefinidos): RITE2014")
        .stdout()
        .contains("EP(step A+B), ren =    34.1, nren=   208.2, tot =   242.3, RER =    0.14")
        .unwrap();
}

#[test]
fn kexp_fuera_de_rango() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo1base.csv", "--kexp", "1.5"])
        .fails()
        .and()
        .stderr()
        .contains("k_exp")
        .unwrap();
}

#[test]
fn area_nula() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo1base.csv", "-A", "0"])
        .fails()
        .unwrap();
}

#[test]
fn archivo_malformado() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo_malformado.csv"])
        .fails()
        .and()
        .stderr()
        .contains("línea 2")
        .unwrap();
}

#[test]
fn archivo_inexistente() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/no_existe.csv"])
        .fails()
        .unwrap();
}

// Factores de paso de usuario ----------------------------------------------------

#[test]
fn cogen_usuario() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo4cgnfosil.csv", "--cogen", "0", "2.5"])
        .stdout()
        .contains("EP(step A)  , ren =     1.3, nren=   237.1, tot =   238.4, RER =    0.01")
        .stdout()
        .contains("EP(step A+B), ren =    -8.3, nren=   248.8, tot =   240.5, RER =   -0.03")
        .unwrap();
}

#[test]
fn cogen_metadatos() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo4cgnfosilmeta.csv"])
        .stdout()
        .contains("EP(step A)  , ren =     1.3, nren=   237.1, tot =   238.4, RER =    0.01")
        .unwrap();
}

#[test]
fn cogen_usuario_prioritario_sobre_metadatos() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo4cgnfosilmeta.csv", "--cogen", "0", "1.0"])
        .stdout()
        .contains("EP(step A)  , ren =     1.3, nren=   279.1, tot =   280.3, RER =    0.00")
        .stdout()
        .contains("EP(step A+B), ren =    -8.3, nren=   248.8, tot =   240.5, RER =   -0.03")
        .unwrap();
}

#[test]
fn cogennepb_usuario() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemplo4cgnfosilnepb.csv", "--cogennepb", "0", "2.5"])
        .stdout()
        .contains("EP(step A)  , ren =     1.3, nren=   261.4, tot =   262.7, RER =    0.00")
        .stdout()
        .contains("EP(step A+B), ren =    -8.3, nren=   248.8, tot =   240.5, RER =   -0.03")
        .unwrap();
}

#[test]
fn redes_predefinidas() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemploredes.csv"])
        .stdout()
        .contains("Fuente de los factores de paso: RITE2014")
        .stdout()
        .contains("EP(step A+B), ren =     0.0, nren=   195.0, tot =   195.0, RER =    0.00")
        .unwrap();
}

#[test]
fn redes_usuario() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemploredes.csv",
            "--red1",
            "1",
            "0",
            "--red2",
            "0.5",
            "0.5",
        ])
        .stdout()
        .contains("EP(step A+B), ren =   125.0, nren=    25.0, tot =   150.0, RER =    0.83")
        .unwrap();
}

#[test]
fn redes_metadatos() {
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemploredesmeta.csv"])
        .stdout()
        .contains("EP(step A+B), ren =   125.0, nren=    25.0, tot =   150.0, RER =    0.83")
        .unwrap();
}

#[test]
fn redes_usuario_prioritario_sobre_metadatos() {
    // RED1 de la línea de comandos, RED2 de los metadatos
    assert_cli::Assert::main_binary()
        .with_args(&["test_data/ejemploredesmeta.csv", "--red1", "0", "1.0"])
        .stdout()
        .contains("EP(step A+B), ren =    25.0, nren=   125.0, tot =   150.0, RER =    0.17")
        .unwrap();
}

// Archivos de salida -------------------------------------------------------------

fn tmpfile(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("epbdcalc_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn salida_simple() {
    let path = tmpfile("salida.txt");
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo1xPV.csv",
            "-f",
            "test_data/factores_paso_test.csv",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();
    let out = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        out,
        "EP(step A)  , ren =   100.0, nren=     0.0, tot =   100.0, RER =    1.00
EP(step A+B), ren =   120.0, nren=   -80.0, tot =    40.0, RER =    3.00
"
    );
}

#[test]
fn salida_json() {
    let path = tmpfile("salida.json");
    assert_cli::Assert::main_binary()
        .with_args(&[
            "test_data/ejemplo4cgnfosil.csv",
            "--cogen",
            "0",
            "2.5",
            "-A",
            "2",
            "--json",
            path.to_str().unwrap(),
        ])
        .unwrap();
    let out = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["arearef"].as_f64(), Some(2.0));
    let nren_a = json["indicators"]["EPAnren"].as_f64().unwrap();
    assert!((nren_a - 118.53).abs() < 0.1);
    let nren = json["performance"]["ep"]["EP"]["nren"].as_f64().unwrap();
    assert!((nren - 248.77).abs() < 0.1);
    assert_eq!(json["performance"]["k_exp"].as_f64(), Some(1.0));
    assert!(json["performance"]["balance_cr"]["ELECTRICIDAD"]["annual"]["COGENERACION"]
        ["to_grid"]
        .is_number());
    let metadata = json["metadata"].as_array().unwrap();
    assert!(metadata
        .iter()
        .any(|m| m["key"] == "CTE_COGEN" && m["value"] == "0.000, 2.500"));
    assert!(metadata
        .iter()
        .any(|m| m["key"] == "CTE_AREAREF" && m["value"] == "2.00"));
}
