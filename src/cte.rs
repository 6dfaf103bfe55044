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

/*! Valores reglamentarios para el CTE
 *
 * - factores de exportación y redistribución y área de referencia por defecto
 * - factores de paso reglamentarios (documento reconocido del RITE, 2014)
 * - factores de paso de usuario por defecto
*/

use crate::{
    error::Result,
    rennren::RenNren,
    wfactors::{Factors, UserWF},
};

/// Valor por defecto del área de referencia.
pub const AREAREF_DEFAULT: f64 = 1.0;
/// Valor predefinido del factor de exportación. Valor reglamentario.
pub const K_EXP_DEFAULT: f64 = 1.0;
/// Valor predefinido del factor de redistribución. Valor reglamentario.
pub const K_RDEL_DEFAULT: f64 = 1.0;

/// Valores por defecto de los factores de paso de usuario
pub const CTE_USERWF: UserWF<RenNren> = UserWF {
    red1: RenNren {
        ren: 0.0,
        nren: 1.3,
    },
    red2: RenNren {
        ren: 0.0,
        nren: 1.3,
    },
    cogen_to_grid: RenNren {
        ren: 0.0,
        nren: 1.0,
    },
    cogen_to_nepb: RenNren {
        ren: 0.0,
        nren: 1.0,
    },
};

/// Factores de paso reglamentarios
///
/// Step A factors account for the resources used to produce the energy. Step B factors
/// account for the resources avoided by the external grid due to the exported energy.
pub const CTE_WFACTORS_RITE2014: &str = "#META CTE_FUENTE: RITE2014
#META CTE_FUENTE_COMENTARIO: Factores de paso del documento reconocido del RITE de 20/07/2014
vector, fuente, uso, step, ren, nren
ELECTRICIDAD, grid, input, A, 0.341, 2.082 # Recursos usados para suministrar electricidad (peninsular) desde la red
ELECTRICIDAD, INSITU, input, A, 1.000, 0.000 # Recursos usados para producir electricidad in situ
ELECTRICIDAD, INSITU, to_grid, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a la red
ELECTRICIDAD, INSITU, to_nEPB, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a usos no EPB
ELECTRICIDAD, INSITU, to_grid, B, 0.341, 2.082 # Recursos ahorrados a la red por la electricidad exportada a la red
ELECTRICIDAD, INSITU, to_nEPB, B, 0.341, 2.082 # Recursos ahorrados a la red por la electricidad exportada a usos no EPB
ELECTRICIDAD, COGENERACION, input, A, 0.000, 0.000 # Sin suministro desde la red (el impacto se computa en el vector de generación)
ELECTRICIDAD, COGENERACION, to_grid, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDAD, COGENERACION, to_nEPB, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDAD, COGENERACION, to_grid, B, 0.341, 2.082 # Recursos ahorrados a la red por la electricidad cogenerada exportada a la red
ELECTRICIDAD, COGENERACION, to_nEPB, B, 0.341, 2.082 # Recursos ahorrados a la red por la electricidad cogenerada exportada a usos no EPB

ELECTRICIDADBALEARES, grid, input, A, 0.094, 3.060 # Recursos usados para suministrar electricidad (Baleares) desde la red
ELECTRICIDADBALEARES, INSITU, input, A, 1.000, 0.000 # Recursos usados para producir electricidad in situ
ELECTRICIDADBALEARES, INSITU, to_grid, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a la red
ELECTRICIDADBALEARES, INSITU, to_nEPB, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a usos no EPB
ELECTRICIDADBALEARES, INSITU, to_grid, B, 0.094, 3.060 # Recursos ahorrados a la red por la electricidad exportada a la red
ELECTRICIDADBALEARES, INSITU, to_nEPB, B, 0.094, 3.060 # Recursos ahorrados a la red por la electricidad exportada a usos no EPB
ELECTRICIDADBALEARES, COGENERACION, input, A, 0.000, 0.000 # Sin suministro desde la red (el impacto se computa en el vector de generación)
ELECTRICIDADBALEARES, COGENERACION, to_grid, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADBALEARES, COGENERACION, to_nEPB, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADBALEARES, COGENERACION, to_grid, B, 0.094, 3.060 # Recursos ahorrados a la red por la electricidad cogenerada exportada a la red
ELECTRICIDADBALEARES, COGENERACION, to_nEPB, B, 0.094, 3.060 # Recursos ahorrados a la red por la electricidad cogenerada exportada a usos no EPB

ELECTRICIDADCANARIAS, grid, input, A, 0.059, 3.058 # Recursos usados para suministrar electricidad (Canarias) desde la red
ELECTRICIDADCANARIAS, INSITU, input, A, 1.000, 0.000 # Recursos usados para producir electricidad in situ
ELECTRICIDADCANARIAS, INSITU, to_grid, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a la red
ELECTRICIDADCANARIAS, INSITU, to_nEPB, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a usos no EPB
ELECTRICIDADCANARIAS, INSITU, to_grid, B, 0.059, 3.058 # Recursos ahorrados a la red por la electricidad exportada a la red
ELECTRICIDADCANARIAS, INSITU, to_nEPB, B, 0.059, 3.058 # Recursos ahorrados a la red por la electricidad exportada a usos no EPB
ELECTRICIDADCANARIAS, COGENERACION, input, A, 0.000, 0.000 # Sin suministro desde la red (el impacto se computa en el vector de generación)
ELECTRICIDADCANARIAS, COGENERACION, to_grid, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADCANARIAS, COGENERACION, to_nEPB, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADCANARIAS, COGENERACION, to_grid, B, 0.059, 3.058 # Recursos ahorrados a la red por la electricidad cogenerada exportada a la red
ELECTRICIDADCANARIAS, COGENERACION, to_nEPB, B, 0.059, 3.058 # Recursos ahorrados a la red por la electricidad cogenerada exportada a usos no EPB

ELECTRICIDADCEUTAMELILLA, grid, input, A, 0.066, 2.759 # Recursos usados para suministrar electricidad (Ceuta y Melilla) desde la red
ELECTRICIDADCEUTAMELILLA, INSITU, input, A, 1.000, 0.000 # Recursos usados para producir electricidad in situ
ELECTRICIDADCEUTAMELILLA, INSITU, to_grid, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a la red
ELECTRICIDADCEUTAMELILLA, INSITU, to_nEPB, A, 1.000, 0.000 # Recursos usados para producir la electricidad exportada a usos no EPB
ELECTRICIDADCEUTAMELILLA, INSITU, to_grid, B, 0.066, 2.759 # Recursos ahorrados a la red por la electricidad exportada a la red
ELECTRICIDADCEUTAMELILLA, INSITU, to_nEPB, B, 0.066, 2.759 # Recursos ahorrados a la red por la electricidad exportada a usos no EPB
ELECTRICIDADCEUTAMELILLA, COGENERACION, input, A, 0.000, 0.000 # Sin suministro desde la red (el impacto se computa en el vector de generación)
ELECTRICIDADCEUTAMELILLA, COGENERACION, to_grid, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADCEUTAMELILLA, COGENERACION, to_nEPB, A, 0.000, 1.000 # Definible por el usuario
ELECTRICIDADCEUTAMELILLA, COGENERACION, to_grid, B, 0.066, 2.759 # Recursos ahorrados a la red por la electricidad cogenerada exportada a la red
ELECTRICIDADCEUTAMELILLA, COGENERACION, to_nEPB, B, 0.066, 2.759 # Recursos ahorrados a la red por la electricidad cogenerada exportada a usos no EPB

MEDIOAMBIENTE, grid, input, A, 1.000, 0.000 # Energía ambiente suministrada (red ficticia)
MEDIOAMBIENTE, INSITU, input, A, 1.000, 0.000 # Energía ambiente captada in situ
MEDIOAMBIENTE, INSITU, to_grid, A, 0.000, 0.000 # No se computa la exportación a la red
MEDIOAMBIENTE, INSITU, to_nEPB, A, 1.000, 0.000 # Exportación a usos no EPB
MEDIOAMBIENTE, INSITU, to_grid, B, 0.000, 0.000 # No se computa la exportación a la red
MEDIOAMBIENTE, INSITU, to_nEPB, B, 1.000, 0.000 # Exportación a usos no EPB

BIOCARBURANTE, grid, input, A, 1.028, 0.085 # Recursos usados para suministrar el vector desde la red
BIOMASA, grid, input, A, 1.003, 0.034 # Recursos usados para suministrar el vector desde la red
BIOMASADENSIFICADA, grid, input, A, 1.028, 0.085 # Recursos usados para suministrar el vector desde la red
CARBON, grid, input, A, 0.002, 1.082 # Recursos usados para suministrar el vector desde la red
FUELOIL, grid, input, A, 0.003, 1.179 # Recursos usados para suministrar el vector desde la red
GASNATURAL, grid, input, A, 0.005, 1.190 # Recursos usados para suministrar el vector desde la red
GASOLEO, grid, input, A, 0.003, 1.179 # Recursos usados para suministrar el vector desde la red
GLP, grid, input, A, 0.030, 1.201 # Recursos usados para suministrar el vector desde la red
RED1, grid, input, A, 0.000, 1.300 # Definible por el usuario (red de distrito)
RED2, grid, input, A, 0.000, 1.300 # Definible por el usuario (red de distrito)
";

/// Factores de paso reglamentarios por defecto
pub fn default_wfactors() -> Result<Factors> {
    CTE_WFACTORS_RITE2014.parse()
}

/// Factores de paso a partir de su definición textual, con los factores de usuario
///
/// User factors given as `Some` replace (or add) the corresponding rows.
pub fn parse_wfactors(wfactorsstring: &str, user: UserWF<Option<RenNren>>) -> Result<Factors> {
    let wfactors: Factors = wfactorsstring.parse()?;
    Ok(wfactors.set_user_wfactors(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Carrier, Dest, Source, Step};
    use pretty_assertions::assert_eq;

    #[test]
    fn cte_default_wfactors() {
        let fp = default_wfactors().unwrap();
        assert_eq!(fp.wdata.len(), 60);
        assert_eq!(
            fp.find(Carrier::ELECTRICIDAD, Source::GRID, Dest::input, Step::A)
                .unwrap(),
            RenNren::new(0.341, 2.082)
        );
        assert_eq!(
            fp.find(Carrier::GASNATURAL, Source::GRID, Dest::input, Step::A)
                .unwrap(),
            RenNren::new(0.005, 1.19)
        );
        assert_eq!(
            fp.find(
                Carrier::MEDIOAMBIENTE,
                Source::INSITU,
                Dest::to_grid,
                Step::B
            )
            .unwrap(),
            RenNren::new(0.0, 0.0)
        );
    }

    #[test]
    fn cte_default_wfactors_all_carriers() {
        use strum::IntoEnumIterator;
        let fp = default_wfactors().unwrap();
        for carrier in Carrier::iter() {
            assert!(fp
                .find(carrier, Source::GRID, Dest::input, Step::A)
                .is_ok());
        }
    }

    #[test]
    fn cte_parse_wfactors_user() {
        let user = UserWF {
            cogen_to_grid: Some(RenNren::new(0.0, 2.5)),
            red1: Some(CTE_USERWF.red1),
            ..Default::default()
        };
        let fp = parse_wfactors(CTE_WFACTORS_RITE2014, user).unwrap();
        assert_eq!(
            fp.find(
                Carrier::ELECTRICIDAD,
                Source::COGENERACION,
                Dest::to_grid,
                Step::A
            )
            .unwrap(),
            RenNren::new(0.0, 2.5)
        );
        assert_eq!(
            fp.find(
                Carrier::ELECTRICIDADCANARIAS,
                Source::COGENERACION,
                Dest::to_grid,
                Step::A
            )
            .unwrap(),
            RenNren::new(0.0, 1.0)
        );
    }
}
