//! Module import declarations
//!
//! Static explanatory text only; nothing here is computed.

const MODULE_IMPORT_INFO: &str = "\
Module Import Declarations simplifica:

1. Importar todos los paquetes de un módulo
2. Reducir código boilerplate
3. Facilitar el uso de librerías modulares
4. Mantener claridad sobre qué módulos se usan

Ventajas:
- Código más limpio
- Menos imports repetitivos
- Mejor expresividad
- Facilita refactoring

Limitaciones:
- Solo funciona con módulos
- No importa paquetes no exportados
- Requiere que el código fuente use módulos
";

const MODULE_EXAMPLE: &str = "\
// module-info.java
module com.monghit.features {
    exports com.monghit.features.api;
    exports com.monghit.features.service;
    exports com.monghit.features.model;

    requires java.base;
    requires spring.boot;
}

// En otra clase:
import module com.monghit.features;

// Ahora tiene acceso a:
// - com.monghit.features.api.*
// - com.monghit.features.service.*
// - com.monghit.features.model.*
";

const APPROACH_COMPARISON: &str = "\
=== Comparación de Imports ===

1. Import específico:
   import java.util.List;
   + Explícito
   + Preciso
   - Verboso para muchas clases

2. Wildcard import:
   import java.util.*;
   + Corto
   - Importa TODO el paquete
   - Puede causar conflictos

3. Module import (Java 25):
   import module java.base;
   + Importa solo paquetes exportados
   + Documenta dependencia de módulo
   + Código más limpio
   - Solo funciona con módulos
";

/// Module import demo component
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleImportDemo;

impl ModuleImportDemo {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// What module imports simplify, with advantages and limits
    #[must_use]
    pub fn demonstrate_module_import(&self) -> &'static str {
        MODULE_IMPORT_INFO
    }

    /// Sample module descriptor and an importing class
    #[must_use]
    pub fn module_example(&self) -> &'static str {
        MODULE_EXAMPLE
    }

    /// Specific, wildcard and module imports side by side
    #[must_use]
    pub fn compare_approaches(&self) -> &'static str {
        tracing::debug!("comparing import approaches");
        APPROACH_COMPARISON
    }
}
