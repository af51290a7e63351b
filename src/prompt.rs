//! Prompt assembly for the two mediation paths.
//!
//! The response shape (fields, entry caps, catalog membership) is only
//! requested here in natural language. Nothing downstream enforces it.

use crate::catalog::CategoryCatalog;

/// Upper bound on recommendations requested for a symptom description.
pub const MAX_SYMPTOM_RECOMMENDATIONS: usize = 2;

/// Upper bound on recommendations requested for a file analysis.
pub const MAX_ANALYSIS_RECOMMENDATIONS: usize = 1;

/// Written in place of the notes when the caller sent none.
pub const NO_NOTES_MARKER: &str = "لا يوجد";

/// What the model must answer with when it cannot read the attachments.
pub const UNREADABLE_ATTACHMENTS_MESSAGE: &str =
    "الملفات المرفقة غير واضحة أو غير قابلة للقراءة، يرجى رفع ملفات أوضح.";

pub fn symptom_prompt(catalog: &CategoryCatalog, symptoms: &str) -> String {
    format!(
        r#"أنت مساعد طبي ذكي متخصص في فرز الحالات وتوجيه المرضى إلى العيادة المناسبة.
قائمة العيادات المتاحة هي: {catalog}

الأعراض التي وصفها المريض: "{symptoms}"

المطلوب: اختر العيادة أو العيادات الأنسب لهذه الأعراض، بحد أقصى {max} عيادة، واذكر سبباً مختصراً لكل اختيار.
يجب أن تكون قيمة "id" واحدة من معرفات العيادات المذكورة في القائمة حرفياً.
أجب بصيغة JSON فقط دون أي نص إضافي، وفق الشكل التالي:
{{"recommendations": [{{"id": "معرف العيادة", "reason": "سبب الترشيح"}}]}}"#,
        catalog = catalog.render(),
        symptoms = symptoms,
        max = MAX_SYMPTOM_RECOMMENDATIONS,
    )
}

pub fn analysis_prompt(catalog: &CategoryCatalog, notes: Option<&str>) -> String {
    let notes = notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(NO_NOTES_MARKER);

    format!(
        r#"أنت مساعد طبي خبير في قراءة التقارير الطبية ونتائج التحاليل وصور الأشعة.
قائمة العيادات المتاحة هي: {catalog}

ملاحظات المريض: "{notes}"

المطلوب: حلل الملفات المرفقة وأجب بصيغة JSON فقط دون أي نص إضافي، على أن يحتوي الرد على ثلاثة حقول بالضبط:
1. "interpretation": شرح مبسط لما تظهره الملفات، مع التوضيح صراحة أن هذه ملاحظات أولية وليست تشخيصاً طبياً.
2. "temporary_advice": قائمة نصوص بنصائح مؤقتة يمكن للمريض اتباعها حتى زيارة الطبيب.
3. "recommendations": قائمة تحتوي على {max} عيادة على الأكثر بالشكل {{"id": "معرف العيادة", "reason": "سبب الترشيح"}}، وقيمة "id" من القائمة أعلاه حرفياً.

إذا كانت الملفات المرفقة غير واضحة أو لا يمكن قراءتها فلا تخمن أي تشخيص، واجعل قيمة "interpretation" هي: "{unreadable}" واترك "temporary_advice" و "recommendations" قائمتين فارغتين.

شكل الرد:
{{"interpretation": "...", "temporary_advice": ["..."], "recommendations": [{{"id": "...", "reason": "..."}}]}}"#,
        catalog = catalog.render(),
        notes = notes,
        max = MAX_ANALYSIS_RECOMMENDATIONS,
        unreadable = UNREADABLE_ATTACHMENTS_MESSAGE,
    )
}
