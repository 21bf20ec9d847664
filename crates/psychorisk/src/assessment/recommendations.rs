//! Advice attached to dimension results, keyed by dimension name and risk label.
//!
//! Worker advice addresses the person who answered the questionnaire; employer advice is
//! action-oriented guidance for whoever administers the organization. Dimensions outside the
//! standard catalog fall back to generic advice for the label.

use serde::Serialize;

use super::domain::RiskLabel;

/// Advice for one (dimension, label) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub worker: &'static [&'static str],
    pub employer: &'static [&'static str],
}

struct Entry {
    dimension: &'static str,
    low: Advice,
    medium: Advice,
    high: Advice,
}

impl Entry {
    fn for_label(&self, label: RiskLabel) -> Advice {
        match label {
            RiskLabel::Low => self.low,
            RiskLabel::Medium => self.medium,
            RiskLabel::High => self.high,
        }
    }
}

const GENERIC_LOW: Advice = Advice {
    worker: &[
        "¡Felicitaciones! Tus resultados en esta dimensión son favorables. Mantén las prácticas que te han traído hasta aquí.",
        "Aprovecha las fortalezas identificadas en esta área y compártelas con tu equipo.",
    ],
    employer: &[
        "MANTENER: las condiciones actuales son adecuadas. Documente las prácticas que las sostienen.",
        "Continúe evaluando periódicamente para detectar cambios a tiempo.",
    ],
};

const GENERIC_MEDIUM: Advice = Advice {
    worker: &[
        "En esta dimensión hay oportunidades de mejora. Identifica qué situaciones concretas te afectan.",
        "Conversa con tu supervisor/a sobre posibles ajustes y busca apoyo cuando lo necesites.",
    ],
    employer: &[
        "Monitoree esta dimensión de forma trimestral con indicadores concretos.",
        "Defina un plan de mejora con responsables y plazos antes de que el riesgo escale.",
    ],
};

const GENERIC_HIGH: Advice = Advice {
    worker: &[
        "Esta dimensión requiere atención. Busca los recursos de apoyo disponibles en la organización.",
        "Registra de manera objetiva las situaciones que te afectan para conversarlas con recursos humanos.",
    ],
    employer: &[
        "ACCIÓN URGENTE: analice las causas de este resultado e intervenga de inmediato.",
        "Asigne un responsable y presupuesto para las medidas correctivas y haga seguimiento mensual.",
    ],
};

const ENTRIES: &[Entry] = &[
    Entry {
        dimension: "Carga y ritmo de trabajo",
        low: Advice {
            worker: &[
                "¡Felicitaciones! Gestionas tu carga de trabajo de forma equilibrada.",
                "Comparte con tu equipo las estrategias de organización que te funcionan.",
            ],
            employer: &[
                "MANTENER: la distribución de tareas es adecuada. Documente las prácticas exitosas.",
                "Siga monitoreando la carga laboral con indicadores preventivos.",
            ],
        },
        medium: Advice {
            worker: &[
                "Prioriza las tareas más importantes para aprovechar mejor tu tiempo.",
                "Habla con tu supervisor/a sobre tu capacidad de trabajo diaria.",
            ],
            employer: &[
                "Revise semanalmente la carga de cada equipo con reportes de avance.",
                "Capacite a los líderes en priorización y gestión del tiempo.",
            ],
        },
        high: Advice {
            worker: &[
                "Solicita una reunión con tu supervisor/a para revisar la distribución de tus tareas.",
                "Respeta tus pausas durante la jornada; el descanso protege tu rendimiento.",
            ],
            employer: &[
                "ACCIÓN URGENTE: audite la distribución de cargas y redistribuya las tareas sobrecargadas.",
                "Evalúe contratar personal adicional o ajustar plazos con los equipos ejecutores.",
            ],
        },
    },
    Entry {
        dimension: "Desarrollo de competencias",
        low: Advice {
            worker: &[
                "¡Excelente! Tienes buenas oportunidades de desarrollo profesional. Aprovéchalas.",
                "Considera acompañar a compañeros que están empezando.",
            ],
            employer: &[
                "MANTENER: la oferta de formación funciona. Conserve su presupuesto.",
                "Reconozca a quienes completan capacitaciones.",
            ],
        },
        medium: Advice {
            worker: &[
                "Identifica las habilidades que te gustaría fortalecer este año.",
                "Pide retroalimentación sobre tu desempeño y áreas de crecimiento.",
            ],
            employer: &[
                "Realice un diagnóstico de necesidades de capacitación por área y puesto.",
                "Programe cursos de actualización trimestrales relevantes al sector.",
            ],
        },
        high: Advice {
            worker: &[
                "Conversa con recursos humanos sobre un plan de formación para tu puesto.",
                "Busca cursos abiertos que complementen tus habilidades actuales.",
            ],
            employer: &[
                "ACCIÓN URGENTE: diseñe un plan anual de capacitación con metas por puesto.",
                "Implemente un programa de mentoría interna y planes de carrera individuales.",
            ],
        },
    },
    Entry {
        dimension: "Liderazgo",
        low: Advice {
            worker: &[
                "¡Muy bien! Cuentas con apoyo de tus superiores. Aprovecha esa relación para crecer.",
                "Mantén la comunicación abierta con tu supervisor/a.",
            ],
            employer: &[
                "MANTENER: el estilo de liderazgo actual es valorado por el equipo.",
                "Use a estos líderes como referentes para otras áreas.",
            ],
        },
        medium: Advice {
            worker: &[
                "Propón reuniones periódicas de seguimiento con tu supervisor/a.",
                "Expresa con claridad qué tipo de apoyo necesitas.",
            ],
            employer: &[
                "Capacite a los mandos medios en comunicación y retroalimentación.",
                "Establezca reuniones individuales periódicas entre líderes y colaboradores.",
            ],
        },
        high: Advice {
            worker: &[
                "Si la relación con tu supervisor/a te afecta, acude a recursos humanos.",
                "Documenta situaciones concretas para tener una conversación constructiva.",
            ],
            employer: &[
                "ACCIÓN URGENTE: evalúe el desempeño de los líderes del área afectada.",
                "Implemente un programa de desarrollo de liderazgo con seguimiento externo.",
            ],
        },
    },
    Entry {
        dimension: "Margen de acción y control",
        low: Advice {
            worker: &[
                "¡Felicitaciones! Tienes buen control sobre tu trabajo.",
                "Comparte tus ideas de mejora con el equipo.",
            ],
            employer: &[
                "MANTENER: la autonomía otorgada favorece el desempeño.",
                "Siga involucrando al personal en las decisiones de su área.",
            ],
        },
        medium: Advice {
            worker: &[
                "Propón mejoras concretas en la forma de organizar tus tareas.",
                "Pregunta qué decisiones puedes tomar sin aprobación previa.",
            ],
            employer: &[
                "Delimite claramente qué decisiones puede tomar cada puesto.",
                "Abra espacios para recoger propuestas de mejora del personal.",
            ],
        },
        high: Advice {
            worker: &[
                "Conversa con tu supervisor/a sobre el grado de autonomía de tu puesto.",
                "Identifica tareas en las que podrías asumir más responsabilidad.",
            ],
            employer: &[
                "ACCIÓN URGENTE: revise los procesos que restringen la autonomía del personal.",
                "Redistribuya la toma de decisiones operativas hacia los equipos.",
            ],
        },
    },
    Entry {
        dimension: "Organización del trabajo",
        low: Advice {
            worker: &[
                "¡Excelente! Tu trabajo está bien organizado y con objetivos claros.",
                "Sigue contribuyendo a mantener un ambiente estructurado.",
            ],
            employer: &[
                "MANTENER: los procesos y objetivos están bien definidos.",
                "Documente los procedimientos para preservarlos ante cambios de personal.",
            ],
        },
        medium: Advice {
            worker: &[
                "Aclara con tu equipo las prioridades de cada semana.",
                "Sugiere herramientas sencillas para coordinar tareas.",
            ],
            employer: &[
                "Revise los flujos de trabajo para eliminar duplicidades.",
                "Comunique los objetivos de cada área de forma periódica.",
            ],
        },
        high: Advice {
            worker: &[
                "Pide que se definan por escrito tus objetivos y plazos.",
                "Informa a tu supervisor/a sobre los cuellos de botella que observas.",
            ],
            employer: &[
                "ACCIÓN URGENTE: rediseñe los procesos críticos con participación de los equipos.",
                "Defina objetivos medibles por área y haga seguimiento mensual.",
            ],
        },
    },
    Entry {
        dimension: "Recuperación",
        low: Advice {
            worker: &[
                "¡Muy bien! Tienes buenas oportunidades de descanso. Mantén ese equilibrio.",
                "Sigue desconectándote del trabajo fuera de tu jornada.",
            ],
            employer: &[
                "MANTENER: las políticas de descanso están funcionando.",
                "Respete los horarios de desconexión del personal.",
            ],
        },
        medium: Advice {
            worker: &[
                "Planifica pausas cortas durante la jornada.",
                "Evita revisar mensajes de trabajo en tu tiempo libre.",
            ],
            employer: &[
                "Promueva pausas activas y el uso efectivo de las vacaciones.",
                "Evite comunicaciones laborales fuera del horario.",
            ],
        },
        high: Advice {
            worker: &[
                "Prioriza tu descanso; si no logras recuperarte, busca apoyo profesional.",
                "Conversa con recursos humanos sobre tus horarios y vacaciones pendientes.",
            ],
            employer: &[
                "ACCIÓN URGENTE: controle horas extra y garantice los descansos obligatorios.",
                "Establezca una política formal de desconexión digital.",
            ],
        },
    },
    Entry {
        dimension: "Soporte y apoyo",
        low: Advice {
            worker: &[
                "¡Excelente! Cuentas con buen apoyo de tus compañeros y superiores.",
                "Sigue siendo un apoyo para otros cuando lo necesiten.",
            ],
            employer: &[
                "MANTENER: la red de apoyo interna es sólida.",
                "Reconozca a los equipos que colaboran entre sí.",
            ],
        },
        medium: Advice {
            worker: &[
                "No dudes en pedir ayuda técnica cuando la necesites.",
                "Participa en espacios de trabajo en equipo.",
            ],
            employer: &[
                "Fortalezca los canales de soporte técnico y de recursos humanos.",
                "Promueva actividades de integración entre áreas.",
            ],
        },
        high: Advice {
            worker: &[
                "Identifica a las personas de confianza a las que puedes acudir.",
                "Busca los recursos de apoyo que ofrece la organización.",
            ],
            employer: &[
                "ACCIÓN URGENTE: cree un programa de acompañamiento para el personal afectado.",
                "Asegure que cada colaborador sepa a quién acudir ante un problema.",
            ],
        },
    },
    Entry {
        dimension: "Otros puntos importantes",
        low: Advice {
            worker: &[
                "¡Felicitaciones! Manejas bien los aspectos adicionales de tu trabajo.",
                "Sigue buscando ayuda a tiempo cuando la necesites.",
            ],
            employer: &[
                "MANTENER: no se observan factores adicionales de riesgo.",
                "Mantenga canales abiertos para reportar situaciones nuevas.",
            ],
        },
        medium: Advice {
            worker: &[
                "Reflexiona sobre qué aspectos de tu trabajo te generan tensión.",
                "Comparte tus inquietudes en los espacios de diálogo disponibles.",
            ],
            employer: &[
                "Indague con encuestas breves qué factores adicionales preocupan al personal.",
                "Revise las políticas de convivencia y trato respetuoso.",
            ],
        },
        high: Advice {
            worker: &[
                "Si enfrentas situaciones de maltrato, repórtalas por los canales formales.",
                "Busca apoyo psicológico si lo necesitas. Es válido pedir ayuda.",
            ],
            employer: &[
                "ACCIÓN URGENTE: habilite un canal confidencial de denuncias y actúe sobre los casos.",
                "Ofrezca acceso a apoyo psicológico para el personal.",
            ],
        },
    },
    Entry {
        dimension: "Ambiente físico",
        low: Advice {
            worker: &[
                "¡Muy bien! Tu espacio de trabajo es adecuado.",
                "Sigue cuidando tu entorno laboral.",
            ],
            employer: &[
                "MANTENER: las condiciones físicas son adecuadas.",
                "Programe inspecciones periódicas de seguridad.",
            ],
        },
        medium: Advice {
            worker: &[
                "Reporta cualquier condición de iluminación, ruido o temperatura que te incomode.",
                "Ajusta tu puesto de trabajo para mantener una postura cómoda.",
            ],
            employer: &[
                "Realice una evaluación ergonómica de los puestos de trabajo.",
                "Atienda los reportes de condiciones físicas en plazos definidos.",
            ],
        },
        high: Advice {
            worker: &[
                "Informa por escrito las condiciones que ponen en riesgo tu salud.",
                "Usa siempre el equipo de protección que corresponde a tu puesto.",
            ],
            employer: &[
                "ACCIÓN URGENTE: corrija las condiciones físicas inseguras identificadas.",
                "Verifique el cumplimiento de la normativa de seguridad y salud ocupacional.",
            ],
        },
    },
    Entry {
        dimension: "Reconocimiento y compensación",
        low: Advice {
            worker: &[
                "¡Excelente! Te sientes reconocido/a por tu trabajo.",
                "Sigue comunicando tus logros y contribuciones.",
            ],
            employer: &[
                "MANTENER: las prácticas de reconocimiento son efectivas.",
                "Revise periódicamente la equidad de la compensación.",
            ],
        },
        medium: Advice {
            worker: &[
                "Registra tus logros para comentarlos en tu evaluación de desempeño.",
                "Conversa sobre tus expectativas de crecimiento con tu supervisor/a.",
            ],
            employer: &[
                "Implemente mecanismos de reconocimiento simbólico frecuentes.",
                "Compare las remuneraciones con el mercado del sector.",
            ],
        },
        high: Advice {
            worker: &[
                "Solicita una conversación formal sobre tu compensación.",
                "Infórmate sobre los criterios de promoción de la organización.",
            ],
            employer: &[
                "ACCIÓN URGENTE: revise la política salarial y los criterios de promoción.",
                "Establezca un programa formal de reconocimiento al desempeño.",
            ],
        },
    },
    Entry {
        dimension: "Claridad de rol",
        low: Advice {
            worker: &[
                "¡Felicitaciones! Tienes claridad sobre tus responsabilidades.",
                "Comunica a tiempo cualquier cambio en tus funciones.",
            ],
            employer: &[
                "MANTENER: los roles están bien definidos.",
                "Actualice las descripciones de puesto cuando cambien los procesos.",
            ],
        },
        medium: Advice {
            worker: &[
                "Pide que se aclaren las funciones que te generan dudas.",
                "Confirma con tu supervisor/a las prioridades cuando cambien.",
            ],
            employer: &[
                "Revise y comunique las descripciones de puesto de cada área.",
                "Evite asignar responsabilidades contradictorias.",
            ],
        },
        high: Advice {
            worker: &[
                "Solicita por escrito la descripción de tu puesto y tus objetivos.",
                "Señala los casos en que recibes instrucciones contradictorias.",
            ],
            employer: &[
                "ACCIÓN URGENTE: defina formalmente funciones y líneas de reporte.",
                "Capacite a los líderes en la asignación clara de tareas.",
            ],
        },
    },
    Entry {
        dimension: "Doble presencia (laboral-familiar)",
        low: Advice {
            worker: &[
                "¡Excelente! Mantienes un buen equilibrio entre trabajo y familia.",
                "Sigue estableciendo límites claros entre ambos espacios.",
            ],
            employer: &[
                "MANTENER: las políticas de conciliación funcionan.",
                "Conserve la flexibilidad horaria existente.",
            ],
        },
        medium: Advice {
            worker: &[
                "Organiza tus horarios para proteger el tiempo con tu familia.",
                "Conversa sobre opciones de flexibilidad si las necesitas.",
            ],
            employer: &[
                "Evalúe opciones de horario flexible o trabajo remoto parcial.",
                "Respete el tiempo familiar evitando reuniones fuera de horario.",
            ],
        },
        high: Advice {
            worker: &[
                "Solicita apoyo a recursos humanos para conciliar tus responsabilidades.",
                "Busca acuerdos concretos de horario con tu supervisor/a.",
            ],
            employer: &[
                "ACCIÓN URGENTE: implemente políticas formales de conciliación laboral-familiar.",
                "Revise las jornadas que impiden atender responsabilidades familiares.",
            ],
        },
    },
    Entry {
        dimension: "Estabilidad laboral percibida",
        low: Advice {
            worker: &[
                "¡Muy bien! Percibes estabilidad en tu empleo.",
                "Aprovecha esa seguridad para planificar tu desarrollo profesional.",
            ],
            employer: &[
                "MANTENER: el personal percibe estabilidad.",
                "Siga comunicando con transparencia la situación de la organización.",
            ],
        },
        medium: Advice {
            worker: &[
                "Infórmate sobre las condiciones de tu contrato.",
                "Fortalece tus habilidades para ampliar tus oportunidades.",
            ],
            employer: &[
                "Comunique con anticipación los cambios organizacionales.",
                "Aclare las condiciones contractuales del personal.",
            ],
        },
        high: Advice {
            worker: &[
                "Consulta con recursos humanos tus dudas sobre la continuidad de tu puesto.",
                "Mantén tu información profesional actualizada.",
            ],
            employer: &[
                "ACCIÓN URGENTE: informe de manera transparente sobre la situación laboral.",
                "Revise la proporción de contratos temporales y su renovación.",
            ],
        },
    },
    Entry {
        dimension: "Salud auto percibida",
        low: Advice {
            worker: &[
                "¡Felicitaciones! Percibes tu salud de forma positiva.",
                "Mantén tus hábitos saludables y tus chequeos médicos.",
            ],
            employer: &[
                "MANTENER: el personal reporta buena salud.",
                "Continúe con los programas de bienestar vigentes.",
            ],
        },
        medium: Advice {
            worker: &[
                "Cuida tu alimentación, actividad física y descanso.",
                "Presta atención a señales de cansancio persistente.",
            ],
            employer: &[
                "Promueva campañas de salud preventiva.",
                "Facilite el acceso a chequeos médicos periódicos.",
            ],
        },
        high: Advice {
            worker: &[
                "Busca atención médica o psicológica si tu salud se está afectando.",
                "Conversa con recursos humanos sobre posibles ajustes en tu trabajo.",
            ],
            employer: &[
                "ACCIÓN URGENTE: coordine evaluaciones de salud ocupacional para el personal afectado.",
                "Ofrezca acceso a atención psicológica y ajustes temporales de funciones.",
            ],
        },
    },
];

const GENERAL_LOW: &[&str] = &[
    "FELICITACIONES: la organización presenta un nivel de riesgo psicosocial bajo.",
    "Documente las prácticas que han generado estos resultados y siga evaluando periódicamente.",
];

const GENERAL_MEDIUM: &[&str] = &[
    "La organización presenta un riesgo medio que requiere atención preventiva.",
    "Implemente un plan de mejora con objetivos trimestrales y fortalezca la comunicación con el personal.",
];

const GENERAL_HIGH: &[&str] = &[
    "PRIORIDAD MÁXIMA: la organización presenta un riesgo psicosocial alto que requiere intervención inmediata.",
    "Conforme un comité de intervención con presupuesto y priorice las dimensiones de mayor riesgo.",
];

/// Advice for a dimension name at the given label.
pub fn advice_for(dimension: &str, label: RiskLabel) -> Advice {
    ENTRIES
        .iter()
        .find(|entry| entry.dimension == dimension)
        .map(|entry| entry.for_label(label))
        .unwrap_or(match label {
            RiskLabel::Low => GENERIC_LOW,
            RiskLabel::Medium => GENERIC_MEDIUM,
            RiskLabel::High => GENERIC_HIGH,
        })
}

/// Organization-level guidance for the predominant label of a cohort.
pub fn general_guidance(label: RiskLabel) -> &'static [&'static str] {
    match label {
        RiskLabel::Low => GENERAL_LOW,
        RiskLabel::Medium => GENERAL_MEDIUM,
        RiskLabel::High => GENERAL_HIGH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{DimensionCatalog, StaticCatalog};

    #[test]
    fn every_standard_dimension_has_tailored_advice() {
        let catalog = StaticCatalog::standard();
        for dimension in catalog.dimensions() {
            for label in RiskLabel::ordered() {
                let advice = advice_for(&dimension.name, label);
                assert!(!advice.worker.is_empty(), "{} {label}", dimension.name);
                assert!(!advice.employer.is_empty(), "{} {label}", dimension.name);
                assert_ne!(advice.worker, advice_for("unlisted", label).worker);
            }
        }
    }

    #[test]
    fn unknown_dimensions_fall_back_to_generic_advice() {
        assert_eq!(advice_for("Dimensión propia", RiskLabel::High), GENERIC_HIGH);
        assert_eq!(advice_for("", RiskLabel::Low), GENERIC_LOW);
    }

    #[test]
    fn high_risk_employer_advice_is_urgent() {
        let advice = advice_for("Carga y ritmo de trabajo", RiskLabel::High);
        assert!(advice.employer[0].starts_with("ACCIÓN URGENTE"));
        assert!(general_guidance(RiskLabel::High)[0].starts_with("PRIORIDAD"));
    }
}
