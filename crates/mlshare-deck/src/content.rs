#![forbid(unsafe_code)]

//! Static page content.
//!
//! Everything the page shows is fixed at compile time. The nav list drives the
//! [`SectionRegistry`]; each [`SectionContent`] carries the body rendered under
//! the anchor of the same id.

use mlshare_core::registry::{RegistryError, SectionRegistry};
use mlshare_core::section::{DisplayMeta, Gradient, Icon, SectionDescriptor};

use crate::assets::Asset;

/// One line of card body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLine {
    Heading(&'static str),
    Text(&'static str),
    Bullet(&'static str),
    /// Bullet with a bold lead term.
    Term(&'static str, &'static str),
    /// Numbered step with a bold lead term.
    Step(u8, &'static str, &'static str),
    /// Icon heading followed by a line of text.
    Icon(Icon, &'static str, &'static str),
}

/// A titled content card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub icon: Option<Icon>,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub body: &'static [BodyLine],
}

impl CardSpec {
    const fn plain(title: &'static str, body: &'static [BodyLine]) -> Self {
        Self {
            icon: None,
            title,
            description: None,
            body,
        }
    }

    const fn described(
        title: &'static str,
        description: &'static str,
        body: &'static [BodyLine],
    ) -> Self {
        Self {
            icon: None,
            title,
            description: Some(description),
            body,
        }
    }

    const fn featured(
        icon: Icon,
        title: &'static str,
        description: Option<&'static str>,
        body: &'static [BodyLine],
    ) -> Self {
        Self {
            icon: Some(icon),
            title,
            description,
            body,
        }
    }
}

/// One tab of a tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    /// Stable tab key.
    pub key: &'static str,
    pub label: &'static str,
    pub cards: &'static [CardSpec],
}

/// Building blocks of a section body, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBlock {
    Figure(Asset),
    Card(CardSpec),
    /// Side by side when wide enough, stacked otherwise.
    Row(&'static [ContentBlock]),
    /// Tab group; the first tab is selected initially.
    Tabs(&'static [TabSpec]),
}

/// Body of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionContent {
    /// Anchor id, equal to the registry id.
    pub id: &'static str,
    /// Small label above the heading (`Section 1`).
    pub badge: &'static str,
    pub heading: &'static str,
    pub lead: &'static str,
    pub blocks: &'static [ContentBlock],
}

impl SectionContent {
    /// The section's tab group, if any.
    #[must_use]
    pub fn tabs(&self) -> Option<&'static [TabSpec]> {
        self.blocks.iter().find_map(|b| match b {
            ContentBlock::Tabs(tabs) => Some(*tabs),
            _ => None,
        })
    }

    /// Every asset referenced by this section, in order.
    #[must_use]
    pub fn assets(&self) -> Vec<Asset> {
        fn walk(blocks: &[ContentBlock], out: &mut Vec<Asset>) {
            for block in blocks {
                match block {
                    ContentBlock::Figure(asset) => out.push(*asset),
                    ContentBlock::Row(inner) => walk(inner, out),
                    ContentBlock::Card(_) | ContentBlock::Tabs(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(self.blocks, &mut out);
        out
    }
}

/// Nav list entry: what the registry is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub gradient: Gradient,
}

impl NavSpec {
    #[must_use]
    pub fn descriptor(&self) -> SectionDescriptor {
        SectionDescriptor::new(self.id, self.title, self.description)
            .with_meta(DisplayMeta::new(self.icon, self.gradient))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    pub badge: &'static str,
    pub heading: &'static str,
    pub heading_accent: &'static str,
    pub lead: &'static str,
    pub cta: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    pub heading: &'static str,
    pub body: &'static str,
    pub tagline: &'static str,
    pub closing: &'static str,
}

/// The whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    pub brand: &'static str,
    pub hero: Hero,
    pub nav: &'static [NavSpec],
    pub sections: &'static [SectionContent],
    pub footer: Footer,
}

impl Deck {
    /// Build the section registry from the nav list.
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        SectionRegistry::new(self.nav.iter().map(NavSpec::descriptor).collect())
    }

    /// Body for section `id`.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&'static SectionContent> {
        self.sections.iter().find(|s| s.id == id)
    }
}

use BodyLine::{Bullet, Heading, Step, Term, Text};

const NAV: &[NavSpec] = &[
    NavSpec {
        id: "foundations",
        title: "ML & Deep Learning Foundations",
        description: "Historical evolution and core concepts with business applications",
        icon: Icon::Brain,
        gradient: Gradient::new("blue-500", "purple-600"),
    },
    NavSpec {
        id: "architectures",
        title: "Core Architecture Evolution",
        description: "From CNN to Transformer with practical implementations",
        icon: Icon::Network,
        gradient: Gradient::new("purple-500", "pink-600"),
    },
    NavSpec {
        id: "practice",
        title: "Theory to Practice",
        description: "Model training, deployment, and RAG technology",
        icon: Icon::Code,
        gradient: Gradient::new("pink-500", "red-600"),
    },
    NavSpec {
        id: "agents",
        title: "Building AI Agents",
        description: "ReAct framework and reinforcement learning optimization",
        icon: Icon::Bot,
        gradient: Gradient::new("red-500", "orange-600"),
    },
    NavSpec {
        id: "future",
        title: "Future Possibilities",
        description: "Implementation areas and business strategies",
        icon: Icon::Rocket,
        gradient: Gradient::new("orange-500", "yellow-600"),
    },
];

const FOUNDATIONS: SectionContent = SectionContent {
    id: "foundations",
    badge: "Section 1",
    heading: "ML & Deep Learning Foundations",
    lead: "Understanding the historical evolution and core concepts with practical business applications",
    blocks: &[
        ContentBlock::Row(&[
            ContentBlock::Figure(Asset::NeuralNetwork),
            ContentBlock::Card(CardSpec::featured(
                Icon::GitBranch,
                "Historical Evolution",
                None,
                &[
                    Heading("Symbolism vs Connectionism"),
                    Text(
                        "The victory of connectionism approach in modern AI, with practical business implications for rule-based vs data-driven systems.",
                    ),
                    Heading("Key Milestones"),
                    Bullet("1986: Backpropagation algorithm popularization"),
                    Bullet("2012: AlexNet ImageNet breakthrough"),
                    Bullet("Modern: Three pillars - Deep networks, Big data, GPU computing"),
                ],
            )),
        ]),
        ContentBlock::Tabs(&[
            TabSpec {
                key: "concepts",
                label: "Core Concepts",
                cards: &[
                    CardSpec::described(
                        "Machine Learning",
                        "Automatic pattern learning from data for prediction and decision-making",
                        &[Text(
                            "Instead of giving computers a \"Cat Recognition Manual\" (rules), we show them thousands of cat photos (data) and let them learn \"what is a cat\".",
                        )],
                    ),
                    CardSpec::described(
                        "Neural Networks",
                        "Mathematical models mimicking biological brain structure",
                        &[Text(
                            "Interconnected \"neurons\" arranged in layers (input, hidden, output) performing weighted sum → activation computations.",
                        )],
                    ),
                ],
            },
            TabSpec {
                key: "training",
                label: "Training Process",
                cards: &[CardSpec::plain(
                    "Training Process: \"Guess → Check Gap → Adjust\" Loop",
                    &[
                        Heading("Forward Propagation"),
                        Text(
                            "Data flows from input layer to output layer, performing \"weighted sum → activation\" at each layer to generate predictions.",
                        ),
                        Text("Analogy: Student attempts a problem based on current knowledge"),
                        Heading("Backpropagation"),
                        Text(
                            "Calculate prediction error using loss function, then propagate this error backward to update each parameter's contribution.",
                        ),
                        Text("Analogy: Teacher provides feedback, student reflects on knowledge gaps"),
                    ],
                )],
            },
            TabSpec {
                key: "components",
                label: "Key Components",
                cards: &[
                    CardSpec::plain(
                        "Activation Functions",
                        &[
                            Text("Introduce non-linearity for complex pattern learning"),
                            Bullet("ReLU: Most commonly used"),
                            Bullet("Sigmoid: Output probability"),
                            Bullet("Tanh: Centered around zero"),
                        ],
                    ),
                    CardSpec::plain(
                        "Loss Functions",
                        &[
                            Text("Quantify prediction vs reality gap"),
                            Bullet("MSE: Regression tasks"),
                            Bullet("Cross-Entropy: Classification"),
                            Bullet("Custom: Domain-specific"),
                        ],
                    ),
                    CardSpec::plain(
                        "Optimizers",
                        &[
                            Text("Parameter update strategies"),
                            Bullet("SGD: Basic gradient descent"),
                            Bullet("Adam: Adaptive + momentum"),
                            Bullet("Learning rate scheduling"),
                        ],
                    ),
                ],
            },
        ]),
    ],
};

const ARCHITECTURES: SectionContent = SectionContent {
    id: "architectures",
    badge: "Section 2",
    heading: "Core Architecture Evolution",
    lead: "From CNN to Transformer with practical business implementations",
    blocks: &[
        ContentBlock::Row(&[
            ContentBlock::Card(CardSpec::featured(
                Icon::Layers,
                "Convolutional Neural Networks (CNN)",
                Some("Image processing specialists with business applications"),
                &[
                    Heading("Core Innovations"),
                    Term("Local Receptive Fields:", "Focus on image regions"),
                    Term("Parameter Sharing:", "Same filter across image"),
                    Term("Pooling:", "Downsampling for efficiency"),
                    Heading("Business Applications"),
                    Bullet("OCR text recognition systems"),
                    Bullet("Medical image analysis"),
                    Bullet("Quality control in manufacturing"),
                ],
            )),
            ContentBlock::Figure(Asset::CnnArchitecture),
        ]),
        ContentBlock::Row(&[
            ContentBlock::Figure(Asset::Transformer),
            ContentBlock::Card(CardSpec::featured(
                Icon::Zap,
                "Transformer & Attention Mechanism",
                Some("Revolutionary architecture dominating modern AI"),
                &[
                    Heading("Multi-Head Attention"),
                    Text(
                        "Parallel attention \"heads\" learning different relationship patterns (grammar, semantics, syntax) for comprehensive understanding.",
                    ),
                    Heading("Business Impact"),
                    Bullet("BERT: Text understanding tasks"),
                    Bullet("GPT: Content generation"),
                    Bullet("ViT: Image classification"),
                    Bullet("Highly parallelizable training"),
                ],
            )),
        ]),
    ],
};

const PRACTICE: SectionContent = SectionContent {
    id: "practice",
    badge: "Section 3",
    heading: "From Theory to Practice",
    lead: "Model training, deployment, and RAG technology implementation",
    blocks: &[
        ContentBlock::Row(&[
            ContentBlock::Figure(Asset::RagArchitecture),
            ContentBlock::Card(CardSpec::featured(
                Icon::Database,
                "RAG Technology",
                Some("Retrieval-Augmented Generation for enhanced AI capabilities"),
                &[
                    Heading("Core Workflow"),
                    Step(1, "Retrieve:", "Search relevant information"),
                    Step(2, "Augment:", "Combine with user query"),
                    Step(3, "Generate:", "LLM produces informed response"),
                    Heading("Business Benefits"),
                    Bullet("Reduces hallucination"),
                    Bullet("Updates knowledge easily"),
                    Bullet("Traceable information sources"),
                ],
            )),
        ]),
        ContentBlock::Tabs(&[
            TabSpec {
                key: "hyperparams",
                label: "Hyperparameter Tuning",
                cards: &[
                    CardSpec::plain(
                        "Learning Rate",
                        &[
                            Text("Most critical hyperparameter"),
                            Bullet("Too high: Oscillation/divergence"),
                            Bullet("Too low: Slow convergence"),
                            Bullet("Use learning rate scheduling"),
                        ],
                    ),
                    CardSpec::plain(
                        "Batch Size",
                        &[
                            Text("Samples per training iteration"),
                            Bullet("Large: Stable but may overfit"),
                            Bullet("Small: Noisy but generalizes"),
                            Bullet("Memory constraints"),
                        ],
                    ),
                    CardSpec::plain(
                        "Configuration Management",
                        &[
                            Text("Engineering best practices"),
                            Bullet("Single config file (YAML/JSON)"),
                            Bullet("Version control integration"),
                            Bullet("Experiment tracking"),
                        ],
                    ),
                ],
            },
            TabSpec {
                key: "peft",
                label: "PEFT Techniques",
                cards: &[CardSpec::described(
                    "Parameter-Efficient Fine-tuning (PEFT)",
                    "Cost-effective adaptation of large models",
                    &[
                        Heading("LoRA (Low-Rank Adaptation)"),
                        Text(
                            "Freeze original weights W, add trainable low-rank matrices A and B. During inference: W + BA provides adapted behavior.",
                        ),
                        Bullet("<1% parameters to train"),
                        Bullet("Significant memory savings"),
                        Bullet("Easy model distribution"),
                        Heading("Local Deployment Benefits"),
                        Bullet("Data security and privacy"),
                        Bullet("Customization for specific domains"),
                        Bullet("Cost control for high-volume usage"),
                        Bullet("Reduced API dependencies"),
                    ],
                )],
            },
            TabSpec {
                key: "deployment",
                label: "Deployment",
                cards: &[
                    CardSpec::plain(
                        "Vector Databases",
                        &[
                            Text("Specialized storage for semantic embeddings with fast similarity search"),
                            Term("Faiss:", "Facebook's library"),
                            Term("Milvus:", "Open-source vector DB"),
                            Term("Pinecone:", "Managed service"),
                            Term("ChromaDB:", "Lightweight option"),
                        ],
                    ),
                    CardSpec::plain(
                        "RAG Fine-tuning",
                        &[
                            Text("Optimize retrieval and generation components"),
                            Term("Retriever:", "Contrastive learning"),
                            Term("Generator:", "Context utilization"),
                            Term("RA-DIT:", "Joint optimization"),
                        ],
                    ),
                ],
            },
        ]),
    ],
};

const AGENTS: SectionContent = SectionContent {
    id: "agents",
    badge: "Section 4",
    heading: "Building AI Agents",
    lead: "ReAct framework and reinforcement learning optimization",
    blocks: &[
        ContentBlock::Row(&[
            ContentBlock::Card(CardSpec::featured(
                Icon::Bot,
                "AI Agent Architecture",
                Some("From passive models to active systems"),
                &[
                    Heading("Paradigm Shift"),
                    Text("Traditional: \"Question → Answer\" (passive)"),
                    Text("Agent: \"Goal → Plan → Act → Reflect\" (active)"),
                    Heading("Core Analogy"),
                    Text("LLM = Brilliant but paralyzed brain"),
                    Text("Agent = Brain + Senses + Limbs + Memory"),
                ],
            )),
            ContentBlock::Figure(Asset::AgentArchitecture),
        ]),
        ContentBlock::Tabs(&[
            TabSpec {
                key: "react",
                label: "ReAct Framework",
                cards: &[CardSpec::described(
                    "ReAct: Reason + Act Framework",
                    "Continuous loop of reasoning and action",
                    &[
                        BodyLine::Icon(Icon::Lightbulb, "Reason", "Analyze situation and plan next step"),
                        BodyLine::Icon(Icon::Target, "Act", "Execute action using available tools"),
                        BodyLine::Icon(Icon::BookOpen, "Observe", "Receive and process tool results"),
                        BodyLine::Icon(Icon::TrendingUp, "Reflect", "Evaluate progress and adjust strategy"),
                    ],
                )],
            },
            TabSpec {
                key: "components",
                label: "Core Components",
                cards: &[
                    CardSpec::plain(
                        "Planning Module",
                        &[
                            Bullet("Zero-shot planning"),
                            Bullet("Few-shot with examples"),
                            Bullet("Chain-of-Thought (CoT)"),
                            Bullet("Tree-of-Thoughts (ToT)"),
                        ],
                    ),
                    CardSpec::plain(
                        "Tool Integration",
                        &[
                            Bullet("Search engines"),
                            Bullet("Code execution"),
                            Bullet("Database queries"),
                            Bullet("Enterprise APIs"),
                        ],
                    ),
                    CardSpec::plain(
                        "Memory Systems",
                        &[
                            Bullet("Short-term: Context window"),
                            Bullet("Long-term: Vector database"),
                            Bullet("Experience replay"),
                            Bullet("Cross-session learning"),
                        ],
                    ),
                ],
            },
            TabSpec {
                key: "frameworks",
                label: "Implementation",
                cards: &[
                    CardSpec::plain(
                        "Popular Frameworks",
                        &[
                            Heading("LangChain/LangGraph"),
                            Text("Comprehensive \"Swiss Army knife\" with mature ecosystem"),
                            Heading("LlamaIndex"),
                            Text("RAG-focused with strong data integration capabilities"),
                            Heading("AutoGen"),
                            Text("Microsoft's multi-agent collaboration framework"),
                        ],
                    ),
                    CardSpec::plain(
                        "Reinforcement Learning",
                        &[
                            Heading("Environment Simulation"),
                            Text("High-fidelity sandboxes for safe training"),
                            Heading("Reward Design"),
                            Text("Outcome-based, process-based, and preference learning"),
                            Heading("RLHF"),
                            Text("Human feedback for reward model training"),
                        ],
                    ),
                ],
            },
        ]),
    ],
};

const FUTURE: SectionContent = SectionContent {
    id: "future",
    badge: "Section 5",
    heading: "Future Possibilities & Implementation",
    lead: "Strategic implementation areas and business considerations",
    blocks: &[
        ContentBlock::Row(&[
            ContentBlock::Figure(Asset::MlPipeline),
            ContentBlock::Card(CardSpec::featured(
                Icon::Rocket,
                "Implementation Strategy",
                Some("From concept to production deployment"),
                &[
                    Heading("Key Application Areas"),
                    Bullet("Customer service automation"),
                    Bullet("Document processing and analysis"),
                    Bullet("Code generation and review"),
                    Bullet("Data analysis and insights"),
                    Heading("Success Factors"),
                    Bullet("Clear ROI measurement"),
                    Bullet("Gradual implementation approach"),
                    Bullet("Team skill development"),
                    Bullet("Risk management strategies"),
                ],
            )),
        ]),
        ContentBlock::Row(&[
            ContentBlock::Card(CardSpec::plain(
                "Technology Trends",
                &[
                    Bullet("Multimodal AI integration"),
                    Bullet("Edge computing deployment"),
                    Bullet("Federated learning adoption"),
                    Bullet("Automated ML pipelines"),
                ],
            )),
            ContentBlock::Card(CardSpec::plain(
                "Business Considerations",
                &[
                    Bullet("Data privacy and security"),
                    Bullet("Regulatory compliance"),
                    Bullet("Cost-benefit analysis"),
                    Bullet("Change management"),
                ],
            )),
            ContentBlock::Card(CardSpec::plain(
                "Team Development",
                &[
                    Bullet("ML engineering skills"),
                    Bullet("Data science capabilities"),
                    Bullet("DevOps for ML (MLOps)"),
                    Bullet("Continuous learning culture"),
                ],
            )),
        ]),
    ],
};

/// The ML Tech Sharing page.
pub const DECK: Deck = Deck {
    brand: "ML Tech Sharing",
    hero: Hero {
        badge: "Advanced ML Technology Sharing",
        heading: "Machine Learning",
        heading_accent: "Technology Sharing",
        lead: "Comprehensive ML knowledge system from foundations to cutting-edge applications, designed for technical teams with practical business implementations",
        cta: "Start Learning",
    },
    nav: NAV,
    sections: &[FOUNDATIONS, ARCHITECTURES, PRACTICE, AGENTS, FUTURE],
    footer: Footer {
        heading: "Ready to Implement ML in Your Business?",
        body: "This comprehensive guide provides the foundation for understanding and implementing machine learning technologies in your technical team and business operations.",
        tagline: "ML Technology Sharing | Built for Technical Teams",
        closing: "Comprehensive knowledge from foundations to cutting-edge applications",
    },
};
