//! Form input handling
//!
//! Each stage tab owns a [`FormState`]: an ordered list of text inputs and
//! selections. Key presses edit the focused field; Enter submits. Submitting
//! converts the raw field values into a typed [`StageRequest`], parsing
//! numbers leniently (malformed text counts as zero).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;

use crate::config::{
    CalculatorConfig, DEFAULT_BREAK_EVEN_BUDGET, DEFAULT_ROI_BUDGET, FormOptions, commission_label,
};
use crate::engine::StageRequest;
use crate::engine::formulas::{
    BreakEvenInput, EffectiveCommissionInput, MaxPaymentsInput, RoiInput, ScenarioInput,
    TargetVolumeInput,
};
use crate::format::{format_number, parse_number_or_default, resolve_volume};
use crate::types::{
    AffiliateEngagement, BreakEvenFormula, CommissionBasis, KolInfluence, MarketSentiment,
    Multiplier, PlatformStatus, RoiFormula, ScenarioMultipliers, Stage,
};

/// Identifies a field within a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    VolumeSelect,
    VolumeOverride,
    AffiliateCommission,
    MasterCommission,
    EffectiveCommission,
    Bonus,
    Payments,
    Budget,
    MarketSentiment,
    PlatformStatus,
    KolInfluence,
    AffiliateEngagement,
}

/// Types of form widgets
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Free text, parsed on submit
    Text { value: String },
    /// One of a fixed list; `values` is parallel to `options` for numeric lists
    Selection {
        options: Vec<String>,
        values: Vec<f64>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: FieldId,
    pub label: String,
    pub widget: FieldWidget,
}

impl FormField {
    pub fn text(id: FieldId, label: &str, value: impl Into<String>) -> Self {
        Self {
            id,
            label: label.to_string(),
            widget: FieldWidget::Text { value: value.into() },
        }
    }

    pub fn numeric_selection(
        id: FieldId,
        label: &str,
        values: Vec<f64>,
        to_label: impl Fn(f64) -> String,
    ) -> Self {
        Self {
            id,
            label: label.to_string(),
            widget: FieldWidget::Selection {
                options: values.iter().map(|v| to_label(*v)).collect(),
                values,
                selected: 0,
            },
        }
    }

    /// Selection over a multiplier enum, starting at its default variant.
    pub fn multiplier<M: Multiplier + Default + PartialEq>(id: FieldId) -> Self {
        let variants: Vec<M> = M::iter().collect();
        let selected = variants.iter().position(|v| *v == M::default()).unwrap_or(0);
        Self {
            id,
            label: M::field_label().to_string(),
            widget: FieldWidget::Selection {
                options: variants.iter().map(|v| v.to_string()).collect(),
                values: variants.iter().map(|v| v.factor()).collect(),
                selected,
            },
        }
    }

    /// Text shown for the field's current value
    pub fn display_value(&self) -> String {
        match &self.widget {
            FieldWidget::Text { value } => value.clone(),
            FieldWidget::Selection { options, selected, .. } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }
}

/// Result of feeding a key to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Key consumed (or ignored); nothing else to do
    None,
    /// User asked to calculate
    Submit,
}

/// Form state for one stage tab
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub stage: Stage,
    pub fields: Vec<FormField>,
    pub focused: usize,
    roi_formula: RoiFormula,
    break_even_formula: BreakEvenFormula,
}

fn volume_fields() -> Vec<FormField> {
    let millions: Vec<f64> = FormOptions::volume_millions()
        .into_iter()
        .map(f64::from)
        .collect();
    vec![
        FormField::numeric_selection(
            FieldId::VolumeSelect,
            "Introduce Volume (in millions)",
            millions,
            |v| format!("{}", v),
        ),
        FormField::text(FieldId::VolumeOverride, "Or enter specific Volume", "0"),
    ]
}

fn split_commission_fields() -> Vec<FormField> {
    vec![
        FormField::numeric_selection(
            FieldId::AffiliateCommission,
            "Affiliate Commission",
            FormOptions::affiliate_commissions(),
            commission_label,
        ),
        FormField::numeric_selection(
            FieldId::MasterCommission,
            "Master Affiliate Commission",
            FormOptions::master_commissions(),
            commission_label,
        ),
    ]
}

fn effective_commission_field() -> FormField {
    FormField::numeric_selection(
        FieldId::EffectiveCommission,
        "Affiliate Effective Commission",
        FormOptions::effective_commissions(),
        commission_label,
    )
}

impl FormState {
    /// Build the form for `stage` under the configured formula variants.
    pub fn for_stage(stage: Stage, config: &CalculatorConfig) -> Self {
        let mut fields = Vec::new();

        match stage {
            Stage::EffectiveCommission => {
                fields.extend(volume_fields());
                fields.extend(split_commission_fields());
                fields.push(FormField::text(FieldId::Bonus, "Bonus ($)", "0.00"));
                fields.push(FormField::text(FieldId::Payments, "Payments ($)", "0.00"));
            }
            Stage::MaxPayments => {
                fields.extend(volume_fields());
                fields.extend(split_commission_fields());
            }
            Stage::BreakEven => {
                fields.push(FormField::text(
                    FieldId::Budget,
                    "Total Budget for Break-even ($)",
                    format_number(DEFAULT_BREAK_EVEN_BUDGET),
                ));
                match config.break_even_formula {
                    BreakEvenFormula::EffectiveCommission => {
                        fields.push(effective_commission_field())
                    }
                    BreakEvenFormula::SplitCommission => fields.extend(split_commission_fields()),
                }
            }
            Stage::TargetVolume => {
                fields.push(FormField::text(FieldId::Bonus, "Target Bonus ($)", "0.00"));
                fields.extend(split_commission_fields());
            }
            Stage::Roi => {
                fields.extend(volume_fields());
                match config.roi_formula {
                    RoiFormula::Simple => fields.push(effective_commission_field()),
                    RoiFormula::CommissionWeighted => fields.extend(split_commission_fields()),
                }
                fields.push(FormField::text(
                    FieldId::Budget,
                    "Total Budget ($)",
                    format_number(DEFAULT_ROI_BUDGET),
                ));
            }
            Stage::Scenario => {
                fields.push(FormField::multiplier::<MarketSentiment>(FieldId::MarketSentiment));
                fields.push(FormField::multiplier::<PlatformStatus>(FieldId::PlatformStatus));
                fields.push(FormField::multiplier::<KolInfluence>(FieldId::KolInfluence));
                fields.push(FormField::multiplier::<AffiliateEngagement>(
                    FieldId::AffiliateEngagement,
                ));
            }
        }

        Self {
            stage,
            fields,
            focused: 0,
            roi_formula: config.roi_formula,
            break_even_formula: config.break_even_formula,
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Overwrite a text field's value. Returns false if the field is not text.
    pub fn set_text(&mut self, id: FieldId, text: &str) -> bool {
        match self.field_mut(id).map(|f| &mut f.widget) {
            Some(FieldWidget::Text { value }) => {
                *value = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Select the option at `index`. Returns false when out of range.
    pub fn select(&mut self, id: FieldId, index: usize) -> bool {
        match self.field_mut(id).map(|f| &mut f.widget) {
            Some(FieldWidget::Selection { options, selected, .. }) if index < options.len() => {
                *selected = index;
                true
            }
            _ => false,
        }
    }

    /// Select the numeric option closest to `value`.
    pub fn select_value(&mut self, id: FieldId, value: f64) -> bool {
        let index = match self.field(id).map(|f| &f.widget) {
            Some(FieldWidget::Selection { values, .. }) => values
                .iter()
                .enumerate()
                .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
                .map(|(i, _)| i),
            _ => None,
        };
        index.is_some_and(|i| self.select(id, i))
    }

    /// Feed a key to the focused field
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Up => {
                self.focused = self.focused.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focused + 1 < self.fields.len() {
                    self.focused += 1;
                }
            }
            code => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    edit_field(field, code, key.modifiers);
                }
            }
        }
        FormAction::None
    }

    fn text(&self, id: FieldId) -> &str {
        match self.field(id).map(|f| &f.widget) {
            Some(FieldWidget::Text { value }) => value,
            _ => "",
        }
    }

    fn number(&self, id: FieldId) -> f64 {
        parse_number_or_default(self.text(id))
    }

    fn selected_value(&self, id: FieldId) -> f64 {
        match self.field(id).map(|f| &f.widget) {
            Some(FieldWidget::Selection { values, selected, .. }) => {
                values.get(*selected).copied().unwrap_or_default()
            }
            _ => 0.0,
        }
    }

    fn selected_variant<M: IntoEnumIterator + Default>(&self, id: FieldId) -> M {
        match self.field(id).map(|f| &f.widget) {
            Some(FieldWidget::Selection { selected, .. }) => {
                M::iter().nth(*selected).unwrap_or_default()
            }
            _ => M::default(),
        }
    }

    fn volume(&self) -> f64 {
        let millions = self.selected_value(FieldId::VolumeSelect) as u32;
        resolve_volume(millions, self.text(FieldId::VolumeOverride))
    }

    fn split_basis(&self) -> CommissionBasis {
        CommissionBasis::Split {
            affiliate: self.selected_value(FieldId::AffiliateCommission),
            master: self.selected_value(FieldId::MasterCommission),
        }
    }

    fn effective_basis(&self) -> CommissionBasis {
        CommissionBasis::Effective {
            rate: self.selected_value(FieldId::EffectiveCommission),
        }
    }

    /// Convert the current field values into a typed request.
    pub fn to_request(&self) -> StageRequest {
        match self.stage {
            Stage::EffectiveCommission => {
                StageRequest::EffectiveCommission(EffectiveCommissionInput {
                    volume: self.volume(),
                    affiliate_commission: self.selected_value(FieldId::AffiliateCommission),
                    master_commission: self.selected_value(FieldId::MasterCommission),
                    bonus: self.number(FieldId::Bonus),
                    payments: self.number(FieldId::Payments),
                })
            }
            Stage::MaxPayments => StageRequest::MaxPayments(MaxPaymentsInput {
                volume: self.volume(),
                affiliate_commission: self.selected_value(FieldId::AffiliateCommission),
                master_commission: self.selected_value(FieldId::MasterCommission),
            }),
            Stage::BreakEven => StageRequest::BreakEven(BreakEvenInput {
                budget: self.number(FieldId::Budget),
                commission: match self.break_even_formula {
                    BreakEvenFormula::EffectiveCommission => self.effective_basis(),
                    BreakEvenFormula::SplitCommission => self.split_basis(),
                },
            }),
            Stage::TargetVolume => StageRequest::TargetVolume(TargetVolumeInput {
                bonus: self.number(FieldId::Bonus),
                affiliate_commission: self.selected_value(FieldId::AffiliateCommission),
                master_commission: self.selected_value(FieldId::MasterCommission),
            }),
            Stage::Roi => StageRequest::Roi(RoiInput {
                volume: self.volume(),
                budget: self.number(FieldId::Budget),
                commission: match self.roi_formula {
                    RoiFormula::Simple => self.effective_basis(),
                    RoiFormula::CommissionWeighted => self.split_basis(),
                },
            }),
            Stage::Scenario => StageRequest::Scenario(ScenarioInput {
                multipliers: ScenarioMultipliers {
                    market: self.selected_variant(FieldId::MarketSentiment),
                    status: self.selected_variant(FieldId::PlatformStatus),
                    kol: self.selected_variant(FieldId::KolInfluence),
                    engagement: self.selected_variant(FieldId::AffiliateEngagement),
                },
            }),
        }
    }
}

fn edit_field(field: &mut FormField, code: KeyCode, modifiers: KeyModifiers) {
    match &mut field.widget {
        FieldWidget::Text { value } => match code {
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                value.push(c);
            }
            _ => {}
        },
        FieldWidget::Selection { options, selected, .. } => {
            if options.is_empty() {
                return;
            }
            match code {
                KeyCode::Left => *selected = (*selected + options.len() - 1) % options.len(),
                KeyCode::Right => *selected = (*selected + 1) % options.len(),
                _ => {}
            }
        }
    }
}
