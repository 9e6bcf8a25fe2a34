//! Quick prompt templates offered by the composer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCategory {
    pub name: &'static str,
    pub prompts: &'static [&'static str],
}

pub static TEMPLATE_CATEGORIES: [TemplateCategory; 4] = [
    TemplateCategory {
        name: "General",
        prompts: &[
            "Tell me a joke",
            "What's the weather like?",
            "Explain quantum physics in simple terms",
            "Give me a motivational quote",
        ],
    },
    TemplateCategory {
        name: "Writing",
        prompts: &[
            "Help me write a professional email",
            "Create a story about adventure",
            "Write a product description",
            "Draft a thank you note",
        ],
    },
    TemplateCategory {
        name: "Learning",
        prompts: &[
            "Teach me about machine learning",
            "Explain the solar system",
            "What is blockchain technology?",
            "How does photosynthesis work?",
        ],
    },
    TemplateCategory {
        name: "Creative",
        prompts: &[
            "Generate creative writing prompts",
            "Suggest a recipe for dinner",
            "Plan a weekend activity",
            "Create a workout routine",
        ],
    },
];

/// Cursor over [`TEMPLATE_CATEGORIES`] used by the picker overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplatePickerState {
    category_index: usize,
    prompt_index: usize,
}

impl TemplatePickerState {
    pub fn category(&self) -> &'static TemplateCategory {
        &TEMPLATE_CATEGORIES[self.category_index]
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn prompt_index(&self) -> usize {
        self.prompt_index
    }

    pub fn selected_prompt(&self) -> Option<&'static str> {
        self.category().prompts.get(self.prompt_index).copied()
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % TEMPLATE_CATEGORIES.len();
        self.prompt_index = 0;
    }

    pub fn previous_category(&mut self) {
        self.category_index = self
            .category_index
            .checked_sub(1)
            .unwrap_or(TEMPLATE_CATEGORIES.len() - 1);
        self.prompt_index = 0;
    }

    pub fn select_next(&mut self) {
        if self.prompt_index + 1 < self.category().prompts.len() {
            self.prompt_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.prompt_index = self.prompt_index.saturating_sub(1);
    }
}
