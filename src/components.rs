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

/*!
Componentes energéticos
=======================

Define el tipo Components (lista de componentes + metadatos) y su lectura desde texto.

Los componentes modelizan el consumo y la producción de energía, por vector energético,
en cada paso de cálculo.
*/

use std::fmt;
use std::str;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EpbdError, Result},
    types::{is_data_line, is_meta_line, Carrier, Component, Meta, MetaVec},
};

/// Lista de datos de componentes con sus metadatos
///
/// List of component data bundled with its metadata
///
/// ```text
/// #META CTE_AREAREF: 100.5
/// vector,tipo,src_dst
/// ELECTRICIDAD,CONSUMO,EPB,16.39,13.11,8.20,7.38,4.10,4.92,6.56,5.74,4.10,6.56,9.84,13.11
/// ELECTRICIDAD,PRODUCCION,INSITU,8.20,6.56,4.10,3.69,2.05,2.46,3.28,2.87,2.05,3.28,4.92,6.56
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Metadata
    pub cmeta: Vec<Meta>,
    /// Component list
    pub cdata: Vec<Component>,
}

impl MetaVec for Components {
    fn get_metavec(&self) -> &Vec<Meta> {
        &self.cmeta
    }
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
        &mut self.cmeta
    }
}

impl Components {
    /// Vectores energéticos presentes en los componentes, en orden de aparición
    pub fn carriers(&self) -> Vec<Carrier> {
        let mut carriers: Vec<Carrier> = Vec::new();
        for c in &self.cdata {
            if !carriers.contains(&c.carrier) {
                carriers.push(c.carrier);
            }
        }
        carriers
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metalines = self
            .cmeta
            .iter()
            .map(|v| format!("{}", v))
            .join("\n");
        let datalines = self
            .cdata
            .iter()
            .map(|v| format!("{}", v))
            .join("\n");
        write!(f, "{}\n{}", metalines, datalines)
    }
}

impl str::FromStr for Components {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<Components> {
        let s_nobom = s.strip_prefix('\u{feff}').unwrap_or(s);
        let lines: Vec<&str> = s_nobom.lines().map(str::trim).collect();
        let cmeta = lines
            .iter()
            .filter(|l| is_meta_line(l))
            .map(|e| e.parse())
            .collect::<Result<Vec<Meta>>>()?;
        let cdata = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| is_data_line(l))
            .map(|(n, l)| {
                l.parse::<Component>().map_err(|e| match e {
                    EpbdError::MalformedInput(msg) => {
                        EpbdError::MalformedInput(format!("línea {}: {}", n + 1, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<Component>>>()?;
        Ok(Components { cmeta, cdata })
    }
}
