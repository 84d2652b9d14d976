use approval_condition::{Context, Value};
use approval_engine::{TemplateService, TemplateStore};
use approval_types::{NewTemplate, TemplatePatch, WorkflowTemplateStep};
use proptest::prelude::*;

fn step_strategy() -> impl Strategy<Value = WorkflowTemplateStep> {
    (
        1u32..10,
        "[A-Z][a-z]{2,8}",
        prop::option::of(prop_oneof![
            (0u32..1000).prop_map(|n| format!("amount > {n}")),
            (0u32..30).prop_map(|n| format!("days >= {n}")),
            Just("urgency === 'critical'".to_string()),
            Just("amount >".to_string()),
            Just("missing > 1".to_string()),
        ]),
    )
        .prop_map(|(number, name, condition)| {
            let step = WorkflowTemplateStep::new(number, name);
            match condition {
                Some(condition) => step.with_condition(condition),
                None => step,
            }
        })
}

fn context_strategy() -> impl Strategy<Value = Context> {
    (
        prop::option::of(0u32..2000),
        prop::option::of(0u32..40),
        prop::option::of(prop_oneof![Just("critical"), Just("low")]),
    )
        .prop_map(|(amount, days, urgency)| {
            let mut ctx = Context::new();
            if let Some(amount) = amount {
                ctx.insert("amount".into(), Value::from(amount));
            }
            if let Some(days) = days {
                ctx.insert("days".into(), Value::from(days));
            }
            if let Some(urgency) = urgency {
                ctx.insert("urgency".into(), Value::from(urgency));
            }
            ctx
        })
}

proptest! {
    #[test]
    fn property_instantiation_is_a_stable_filter(
        steps in prop::collection::vec(step_strategy(), 0..8),
        ctx in context_strategy(),
    ) {
        let service = TemplateService::in_memory();
        let mut input = NewTemplate::new("Generated", "Prop");
        input.steps = steps.clone();
        let created = service.create_template(input).unwrap();

        let first = service.instantiate_template(&created.id, &ctx).unwrap();
        let second = service.instantiate_template(&created.id, &ctx).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(service.get_template(&created.id).unwrap(), created);

        // Output is a subsequence of the template steps
        let mut remaining = steps.iter();
        for out in &first.steps {
            prop_assert!(remaining.any(|s| s.step_number == out.step_number));
        }

        // Unconditional steps always appear
        let unconditional = steps.iter().filter(|s| s.condition.is_none()).count();
        prop_assert!(first.steps.len() >= unconditional);
        if steps.iter().all(|s| s.condition.is_none()) {
            prop_assert_eq!(first.steps.len(), steps.len());
        }
    }

    #[test]
    fn property_update_keeps_id_and_advances_timestamp(
        names in prop::collection::vec("[A-Za-z]{1,12}", 1..6),
    ) {
        let service = TemplateService::in_memory();
        let created = service
            .create_template(NewTemplate::new("Start", "Prop").with_id("fixed"))
            .unwrap();

        let mut previous = created.updated_at;
        for name in names {
            let patch = TemplatePatch {
                id: Some(format!("not-{name}").as_str().into()),
                ..TemplatePatch::new().name(name.clone())
            };
            let updated = service.update_template(&created.id, patch).unwrap();
            prop_assert_eq!(&updated.id, &created.id);
            prop_assert_eq!(updated.name, name);
            prop_assert!(updated.updated_at > previous);
            previous = updated.updated_at;
        }
        prop_assert_eq!(service.store().count().unwrap(), 1);
    }
}
