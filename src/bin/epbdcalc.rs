// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

#[macro_use]
extern crate clap;

use std::fs::{read_to_string, write};
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::{App, AppSettings, Arg};
use itertools::Itertools;
use serde_json::json;
use tracing::{debug, info, warn, Level};

use epbdrs::*;

// Funciones auxiliares -----------------------------------------------------------------------

fn readfile(path: &Path) -> String {
    read_to_string(path).unwrap_or_else(|err| {
        eprintln!(
            "ERROR: No se ha podido leer el archivo \"{}\": {}",
            path.display(),
            err
        );
        exit(exitcode::IOERR);
    })
}

fn writefile(path: &Path, content: &[u8]) {
    if let Err(err) = write(path, content) {
        eprintln!(
            "ERROR: No se ha podido escribir en \"{}\": {}",
            path.display(),
            err
        );
        exit(exitcode::IOERR);
    }
}

fn rennren_from_args(values: Option<clap::Values<'_>>, name: &str) -> Option<RenNren> {
    values.map(|v| {
        let vv = v
            .map(|vv| f64::from_str(vv.trim()))
            .collect::<Result<Vec<f64>, _>>()
            .unwrap_or_else(|_| {
                eprintln!("ERROR: Los factores de paso de {} no son valores numéricos válidos", name);
                exit(exitcode::DATAERR);
            });
        RenNren::new(vv[0], vv[1])
    })
}

/// Obtiene factor de paso de usuario priorizando CLI -> metadatos
fn get_user_factor(
    matches_values: Option<clap::Values<'_>>,
    components: &mut Components,
    meta: &str,
    descr: &str,
) -> Option<RenNren> {
    let mut orig = "usuario";
    let factor = rennren_from_args(matches_values, descr).or_else(|| {
        orig = "metadatos";
        components.get_meta_rennren(meta)
    });
    if let Some(factor) = factor {
        info!("Factores de paso para {} ({}): {}", descr, orig, factor);
        components.update_meta(meta, &format!("{:.3}, {:.3}", factor.ren, factor.nren));
    };
    factor
}

/// Obtiene un parámetro numérico priorizando CLI -> metadatos -> valor por defecto
fn get_param(
    matches: &clap::ArgMatches<'_>,
    arg: &str,
    components: &Components,
    meta: &str,
    default: f64,
) -> (f64, &'static str) {
    if matches.is_present(arg) {
        let value = value_t!(matches, arg, f64).unwrap_or_else(|_| {
            eprintln!("ERROR: El parámetro {} no es un valor numérico válido", arg);
            exit(exitcode::DATAERR);
        });
        if let Some(metavalue) = components.get_meta_f64(meta) {
            if (metavalue - value).abs() > 1e-3 {
                warn!(
                    "El valor de {} de los metadatos ({:.2}) no coincide con el definido por el usuario ({:.2})",
                    meta, metavalue, value
                );
            }
        }
        (value, "usuario")
    } else if components.has_meta(meta) {
        let value = components.get_meta_f64(meta).unwrap_or_else(|| {
            eprintln!("ERROR: El valor de {} de los metadatos no es un valor numérico válido", meta);
            exit(exitcode::DATAERR);
        });
        (value, "metadatos")
    } else {
        (default, "predefinido")
    }
}

fn check_range(name: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        eprintln!(
            "ERROR: el factor {} debe estar entre 0.00 y 1.00 y vale {:.2}",
            name, value
        );
        exit(exitcode::DATAERR);
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

// Función principal ------------------------------------------------------------------------------

fn main() {
    let matches = App::new("epbdcalc")
        .bin_name("epbdcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018-2022 Ministerio de Fomento,
                        Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Autores: Rafael Villar Burke <pachi@ietcc.csic.es>,
         Daniel Jiménez González <danielj@ietcc.csic.es>
         Marta Sorribes Gil <msorribes@ietcc.csic.es>

Licencia: Publicado bajo licencia MIT.

")
        .about("epbdcalc - Balance energético y energía ponderada de los edificios (EN ISO 52000-1).")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("vecfile")
            .value_name("ARCHIVO_VECTORES")
            .help("Archivo de datos de los vectores energéticos")
            .required(true)
            .index(1))
        .arg(Arg::with_name("archivo_factores")
            .short("f")
            .long("factores")
            .value_name("ARCHIVO_FACTORES")
            .help("Archivo de definición de los factores de paso (por defecto, los reglamentarios)")
            .takes_value(true)
            .display_order(1))
        .arg(Arg::with_name("krdel")
            .long("krdel")
            .value_name("KRDEL")
            .help("Factor de redistribución de la energía exportada (k_rdel)")
            .takes_value(true)
            .display_order(2))
        .arg(Arg::with_name("kexp")
            .long("kexp")
            .value_name("KEXP")
            .help("Factor de exportación (k_exp)")
            .takes_value(true)
            .display_order(3))
        .arg(Arg::with_name("arearef")
            .short("A")
            .long("area")
            .value_name("AREAREF")
            .help("Área de referencia [m2]")
            .takes_value(true)
            .display_order(4))
        .arg(Arg::with_name("outfile")
            .short("o")
            .long("outfile")
            .value_name("ARCHIVO_SALIDA")
            .help("Archivo de salida de resultados en formato simple")
            .takes_value(true))
        .arg(Arg::with_name("archivo_salida_json")
            .long("json")
            .value_name("ARCHIVO_SALIDA_JSON")
            .help("Archivo de salida de resultados detallados en formato JSON")
            .takes_value(true))
        .arg(Arg::with_name("cogen")
            .long("cogen")
            .value_names(&["COGEN_ren", "COGEN_nren"])
            .help("Factores de exportación a la red (ren, nren) de electricidad cogenerada.\nP.e.: --cogen 0 2.5")
            .takes_value(true)
            .number_of_values(2))
        .arg(Arg::with_name("cogennepb")
            .long("cogennepb")
            .value_names(&["COGENNEPB_ren", "COGENNEPB_nren"])
            .help("Factores de exportación a usos no EPB (ren, nren) de electricidad cogenerada.\nP.e.: --cogennepb 0 2.5")
            .takes_value(true)
            .number_of_values(2))
        .arg(Arg::with_name("red1")
            .long("red1")
            .value_names(&["RED1_ren", "RED1_nren"])
            .help("Factores de paso (ren, nren) del vector RED1.\nP.e.: --red1 0 1.3")
            .takes_value(true)
            .number_of_values(2))
        .arg(Arg::with_name("red2")
            .long("red2")
            .value_names(&["RED2_ren", "RED2_nren"])
            .help("Factores de paso (ren, nren) del vector RED2.\nP.e.: --red2 0 1.3")
            .takes_value(true)
            .number_of_values(2))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Nivel de detalle de los mensajes"))
        .get_matches();

    init_logging(matches.occurrences_of("v"));

    // Datos energéticos -----------------------------------------------------------------------
    let vecpath = Path::new(matches.value_of_os("vecfile").unwrap_or_default());
    let mut components: Components = readfile(vecpath).parse().unwrap_or_else(|err| {
        eprintln!(
            "ERROR: Formato incorrecto del archivo de vectores energéticos \"{}\" ({})",
            vecpath.display(),
            err
        );
        exit(exitcode::DATAERR);
    });
    println!("Vectores energéticos: \"{}\"", vecpath.display());
    info!("Vectores: {}", components.carriers().iter().join(", "));
    for meta in &components.cmeta {
        debug!("Metadato {}: {}", meta.key, meta.value);
    }

    // Factores de paso de usuario ---------------------------------------------------------------
    let user_wf = UserWF {
        red1: get_user_factor(matches.values_of("red1"), &mut components, "CTE_RED1", "RED1"),
        red2: get_user_factor(matches.values_of("red2"), &mut components, "CTE_RED2", "RED2"),
        cogen_to_grid: get_user_factor(
            matches.values_of("cogen"),
            &mut components,
            "CTE_COGEN",
            "COGENERACION a la red",
        ),
        cogen_to_nepb: get_user_factor(
            matches.values_of("cogennepb"),
            &mut components,
            "CTE_COGENNEPB",
            "COGENERACION a usos no EPB",
        ),
    };

    // Factores de paso --------------------------------------------------------------------------
    let wfactors_result = match matches.value_of_os("archivo_factores").map(Path::new) {
        Some(path) => {
            println!("Factores de paso (archivo): \"{}\"", path.display());
            cte::parse_wfactors(&readfile(path), user_wf)
        }
        None => {
            println!("Factores de paso (predefinidos): RITE2014");
            cte::default_wfactors().map(|fp| fp.set_user_wfactors(user_wf))
        }
    };
    let wfactors = wfactors_result.unwrap_or_else(|err| {
        eprintln!("ERROR: No se han podido interpretar los factores de paso ({})", err);
        exit(exitcode::DATAERR);
    });
    if let Some(fuente) = wfactors.get_meta("CTE_FUENTE") {
        println!("Fuente de los factores de paso: {}", fuente);
    }

    // Parámetros ----------------------------------------------------------------------------------
    // Argumentos de CLI > Metadatos de componentes > Valor por defecto
    let (k_rdel, orig) = get_param(&matches, "krdel", &components, "CTE_KRDEL", cte::K_RDEL_DEFAULT);
    check_range("k_rdel", k_rdel);
    println!("Factor de redistribución ({}) [-]: {:.2}", orig, k_rdel);

    let (k_exp, orig) = get_param(&matches, "kexp", &components, "CTE_KEXP", cte::K_EXP_DEFAULT);
    check_range("k_exp", k_exp);
    println!("Factor de exportación ({}) [-]: {:.2}", orig, k_exp);
    if (k_exp - cte::K_EXP_DEFAULT).abs() > f64::EPSILON {
        warn!(
            "Factor de exportación k_exp ({:.2}) distinto al reglamentario ({:.2})",
            k_exp,
            cte::K_EXP_DEFAULT
        );
    }

    let (arearef, orig) = get_param(&matches, "arearef", &components, "CTE_AREAREF", cte::AREAREF_DEFAULT);
    if arearef <= 1e-3 {
        eprintln!(
            "ERROR: el área de referencia debe ser mayor que 0.00 y vale {:.2}",
            arearef
        );
        exit(exitcode::DATAERR);
    }
    println!("Área de referencia ({}) [m2]: {:.2}", orig, arearef);

    components.update_meta("CTE_KRDEL", &format!("{:.2}", k_rdel));
    components.update_meta("CTE_KEXP", &format!("{:.2}", k_exp));
    components.update_meta("CTE_AREAREF", &format!("{:.2}", arearef));

    // Cálculo -------------------------------------------------------------------------------------
    let result = EnergyData::from_components(&components)
        .and_then(|data| energy_performance(&data, k_rdel, k_exp, Some(&wfactors)))
        .and_then(|ep| Indicators::from_weighted(&ep.ep, arearef).map(|ind| (ep, ind)));
    let (performance, indicators) = result.unwrap_or_else(|err| {
        eprintln!("ERROR: No se ha podido calcular el balance energético ({})", err);
        exit(exitcode::DATAERR);
    });

    // Salida de resultados ------------------------------------------------------------------------
    let plain = indicators.to_plain();
    println!("** Energía ponderada [kWh/m2.an]\n{}", plain);

    if let Some(path) = matches.value_of_os("outfile").map(Path::new) {
        info!("Resultados en formato simple: {}", path.display());
        writefile(path, plain.as_bytes());
    }

    if let Some(path) = matches.value_of_os("archivo_salida_json").map(Path::new) {
        info!("Resultados en formato JSON: {}", path.display());
        let out = json!({
            "metadata": components.cmeta,
            "arearef": arearef,
            "indicators": indicators,
            "performance": performance,
        });
        let json = serde_json::to_string_pretty(&out).unwrap_or_else(|err| {
            eprintln!("ERROR: No se ha podido convertir el balance al formato JSON ({})", err);
            exit(exitcode::SOFTWARE);
        });
        writefile(path, json.as_bytes());
    }
}
