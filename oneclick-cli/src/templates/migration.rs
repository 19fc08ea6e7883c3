//! Migration template

/// Registry name of [`CREATE`]
pub const CREATE_NAME: &str = "migration/create";

/// Create (or drop and recreate) the entity table
pub const CREATE: &str = r"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    /**
     * Run the migrations.
     */
    public function up(): void
    {
{% if recreate %}
        Schema::dropIfExists('{{ table }}');

{% endif %}
        Schema::create('{{ table }}', function (Blueprint $table) {
            $table->id();
{% for column in columns %}
            {{ column }}
{% endfor %}
            $table->timestamps();
        });
    }

    /**
     * Reverse the migrations.
     */
    public function down(): void
    {
        Schema::dropIfExists('{{ table }}');
    }
};
";
